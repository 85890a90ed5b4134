//! A leader's meeting schedule as entered by an operator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::parse_date;

/// Meeting length when neither the leader nor the config says otherwise.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Longest meeting accepted from stored records: one day.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Free-text schedule fields for one leader.
///
/// Nothing here is validated up front; the generator parses the raw text
/// each time and skips leaders whose day or time can't be understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderSchedule {
    pub weekday_raw: String,
    pub time_raw: String,
    pub frequency_raw: Option<String>,
    /// Fixes which weeks an every-other-week schedule lands on.
    pub anchor_date: Option<NaiveDate>,
    pub duration_minutes: i64,
}

impl LeaderSchedule {
    pub fn new(weekday: impl Into<String>, time: impl Into<String>) -> Self {
        LeaderSchedule {
            weekday_raw: weekday.into(),
            time_raw: time.into(),
            frequency_raw: None,
            anchor_date: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn with_frequency(mut self, frequency: Option<&str>) -> Self {
        self.frequency_raw = frequency.map(str::to_string);
        self
    }

    pub fn with_anchor_date(mut self, anchor: Option<NaiveDate>) -> Self {
        self.anchor_date = anchor;
        self
    }

    /// Set the anchor from stored text. Malformed dates are dropped and the
    /// schedule falls back to unanchored parity.
    pub fn with_anchor_str(mut self, anchor: Option<&str>) -> Self {
        self.anchor_date = anchor
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| match parse_date(s) {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::debug!(anchor = s, "ignoring malformed anchor date");
                    None
                }
            });
        self
    }

    /// Set the meeting length. Values that aren't a positive number of
    /// minutes up to a day are dropped and the current length is kept.
    pub fn with_duration_minutes(mut self, minutes: i64) -> Self {
        if is_valid_duration(minutes) {
            self.duration_minutes = minutes;
        } else {
            tracing::debug!(minutes, "ignoring out-of-range meeting duration");
        }
        self
    }
}

pub fn is_valid_duration(minutes: i64) -> bool {
    (1..=MAX_DURATION_MINUTES).contains(&minutes)
}

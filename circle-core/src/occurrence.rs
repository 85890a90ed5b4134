//! Concrete meeting instances.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

/// One dated meeting of a leader's circle.
///
/// Occurrences are recomputed whenever the visible range changes and are
/// never stored or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub id: String,
    pub leader_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Occurrence {
    /// Build the meeting starting at `start`. Returns `None` when the end
    /// would not be after the start or falls outside chrono's date range.
    pub fn new(leader_id: &str, start: NaiveDateTime, duration_minutes: i64) -> Option<Self> {
        if duration_minutes <= 0 {
            return None;
        }
        let end = Duration::try_minutes(duration_minutes)
            .and_then(|duration| start.checked_add_signed(duration))?;

        Some(Occurrence {
            id: occurrence_id(leader_id, start.date()),
            leader_id: leader_id.to_string(),
            start,
            end,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Start and end pinned to the organization's time zone.
    ///
    /// A start time in a DST gap has no instant and returns `None`;
    /// ambiguous ones resolve to the earlier instant. The end is the start
    /// plus the meeting length, so it may read differently on the wall clock
    /// when a transition falls inside the meeting.
    pub fn in_timezone(&self, tz: Tz) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        let start = tz.from_local_datetime(&self.start).earliest()?;
        let end = start.checked_add_signed(self.end - self.start)?;
        Some((start, end))
    }
}

/// Stable id for a leader's meeting on a given day.
pub fn occurrence_id(leader_id: &str, date: NaiveDate) -> String {
    format!("{}:{}", leader_id, date.format("%Y-%m-%d"))
}

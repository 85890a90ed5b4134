//! Free-text meeting frequency classification.
//!
//! Operators write things like "Bi-weekly", "1st & 3rd", "every other week"
//! or "Quarterly". Everything downstream works with [`ParsedFrequency`] only.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A classified meeting frequency. Exactly one shape per schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedFrequency {
    /// Every week (1) or every other week (2).
    Weekly { interval_weeks: u32 },
    /// Specific ordinal weeks of each month, e.g. {1, 3} for "1st & 3rd".
    WeekOfMonth { weeks: BTreeSet<u32> },
    /// One meeting every `interval_months` months.
    MonthlyInterval { interval_months: u32 },
}

impl Default for ParsedFrequency {
    fn default() -> Self {
        ParsedFrequency::Weekly { interval_weeks: 1 }
    }
}

impl fmt::Display for ParsedFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedFrequency::Weekly { interval_weeks: 1 } => write!(f, "weekly"),
            ParsedFrequency::Weekly { interval_weeks } => {
                write!(f, "every {} weeks", interval_weeks)
            }
            ParsedFrequency::WeekOfMonth { weeks } => {
                let ordinals: Vec<String> = weeks.iter().map(|w| ordinal(*w)).collect();
                write!(f, "{} of the month", ordinals.join(" & "))
            }
            ParsedFrequency::MonthlyInterval { interval_months: 1 } => write!(f, "monthly"),
            ParsedFrequency::MonthlyInterval { interval_months } => {
                write!(f, "every {} months", interval_months)
            }
        }
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn ordinal_week_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(1st|first|2nd|second|3rd|third|4th|fourth|5th|fifth)\b")
            .expect("ordinal week regex should compile")
    })
}

/// Phrases that mean "every week" or "every other week"; they win over
/// ordinal mentions ("weekly, starting the 1st and 2nd").
const WEEKLY_WORDS: &[&str] = &["weekly", "bi-weekly", "biweekly", "every other"];

const BIWEEKLY_WORDS: &[&str] = &[
    "every other",
    "bi-week",
    "bi-weekly",
    "biweekly",
    "2 week",
    "2-week",
];

/// Classify a free-text frequency.
///
/// Missing or unrecognized text falls back to weekly, so a leader with a
/// known day and time still shows up on the calendar.
pub fn parse_frequency(input: Option<&str>) -> ParsedFrequency {
    let Some(input) = input else {
        return ParsedFrequency::default();
    };
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return ParsedFrequency::default();
    }

    let weeks = ordinal_weeks(&text);
    let mentions_weekly = WEEKLY_WORDS.iter().any(|w| text.contains(w));

    if weeks.len() >= 2 && !mentions_weekly {
        return ParsedFrequency::WeekOfMonth { weeks };
    }

    if text.contains("quarter") {
        return ParsedFrequency::MonthlyInterval { interval_months: 3 };
    }

    if text.contains("month") {
        return ParsedFrequency::MonthlyInterval { interval_months: 1 };
    }

    let interval_weeks = if BIWEEKLY_WORDS.iter().any(|w| text.contains(w)) {
        2
    } else {
        1
    };
    ParsedFrequency::Weekly { interval_weeks }
}

/// Distinct ordinal weeks (1..=5) mentioned in already-lowercased text.
fn ordinal_weeks(text: &str) -> BTreeSet<u32> {
    ordinal_week_regex()
        .captures_iter(text)
        .filter_map(|caps| match &caps[1] {
            "1st" | "first" => Some(1),
            "2nd" | "second" => Some(2),
            "3rd" | "third" => Some(3),
            "4th" | "fourth" => Some(4),
            "5th" | "fifth" => Some(5),
            _ => None,
        })
        .collect()
}

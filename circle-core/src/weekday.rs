//! Weekday names as operators type them.

use chrono::Weekday;

const WEEKDAY_NAMES: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("weds", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sun", Weekday::Sun),
];

/// Parse a free-text day name ("Wednesday", " weds ", "THU") into a weekday.
///
/// Returns `None` for anything not in the table; callers treat that as
/// "this leader can't be scheduled".
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    let normalized = input.trim().trim_end_matches('.').to_lowercase();

    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, weekday)| *weekday)
}

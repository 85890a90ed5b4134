//! Meeting time parsing ("7:00 PM", "19:00", "7pm").

use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

fn twenty_four_hour_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("24-hour regex should compile"))
}

/// Covers `h:mm a`, `h a`, `h:mma` and `ha`.
fn meridiem_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*([ap])m$").expect("meridiem regex should compile")
    })
}

/// Formats tried last, once the strict variants have all failed.
const GENERIC_FORMATS: &[&str] = &["%H:%M:%S", "%I:%M:%S %p", "%I:%M:%S%p", "%H%M"];

/// Parse a free-text meeting time into a time of day.
///
/// Formats are tried in a fixed order and the first match wins: 24-hour,
/// then 12-hour with a meridiem, then a generic fallback.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    parse_twenty_four_hour(&normalized)
        .or_else(|| parse_meridiem(&normalized))
        .or_else(|| parse_generic(&normalized))
}

fn parse_twenty_four_hour(input: &str) -> Option<NaiveTime> {
    let caps = twenty_four_hour_regex().captures(input)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_meridiem(input: &str) -> Option<NaiveTime> {
    let caps = meridiem_regex().captures(input)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match (&caps[3], hour) {
        ("a", 12) => 0,
        ("a", h) => h,
        (_, 12) => 12,
        (_, h) => h + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_generic(input: &str) -> Option<NaiveTime> {
    match input {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    // "7 p.m." -> "7 pm"
    let undotted = input.replace("a.m.", "am").replace("p.m.", "pm");
    if undotted != input {
        if let Some(time) = parse_meridiem(&undotted) {
            return Some(time);
        }
    }

    GENERIC_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&undotted, fmt).ok())
}

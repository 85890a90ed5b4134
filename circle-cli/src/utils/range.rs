use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use circle_core::date_range::{DateRange, parse_date};

/// Which range to show when no explicit dates are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Week,
    Month,
}

/// Today's date in the organization's time zone.
pub fn today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Resolve `--from`/`--to`, falling back to the span containing `today`.
///
/// With only `--from`, the range covers one span starting that day.
pub fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    span: Span,
    today: NaiveDate,
) -> Result<DateRange> {
    match (from, to) {
        (None, None) => Ok(match span {
            Span::Week => DateRange::week_of(today),
            Span::Month => DateRange::month_of(today),
        }),
        (from, to) => {
            let first = match from {
                Some(s) => parse_day(s)?,
                None => today,
            };
            let last = match (to, span) {
                (Some(s), _) => parse_day(s)?,
                (None, Span::Week) => first + Duration::days(6),
                (None, Span::Month) => first + Duration::days(30),
            };
            if last < first {
                anyhow::bail!("--to ({}) is before --from ({})", last, first);
            }
            Ok(DateRange::from_dates(first, last))
        }
    }
}

/// Parse YYYY-MM-DD, or a phrase like "today" or "next monday".
fn parse_day(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = parse_date(input) {
        return Ok(date);
    }

    fuzzydate::parse(input)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

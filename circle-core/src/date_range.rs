//! Visible date range for generating occurrences.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CircleError, CircleResult};

/// Half-open range `[start, end)` in organizational local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        DateRange { start, end }
    }

    /// Whole days from `first` through `last`, both inclusive.
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        DateRange {
            start: first.and_time(NaiveTime::MIN),
            end: (last + Duration::days(1)).and_time(NaiveTime::MIN),
        }
    }

    /// The Monday-to-Sunday week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let monday = week_start(date);
        Self::from_dates(monday, monday + Duration::days(6))
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let first = first_of_month(date);
        let next = first + Months::new(1);
        DateRange {
            start: first.and_time(NaiveTime::MIN),
            end: next.and_time(NaiveTime::MIN),
        }
    }

    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        *instant >= self.start && *instant < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// First day of every calendar month that overlaps the range, in order.
    pub fn months(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let first = first_of_month(self.start.date());
        let empty = self.is_empty();

        std::iter::successors(Some(first), |month| month.checked_add_months(Months::new(1)))
            .take_while(move |month| !empty && month.and_time(NaiveTime::MIN) < self.end)
    }
}

/// Parse YYYY-MM-DD.
pub fn parse_date(s: &str) -> CircleResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        CircleError::InvalidDate(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

//! Occurrence generation for leader schedules.
//!
//! Expands a leader's parsed schedule into concrete meetings within a
//! half-open date range. Generation is a pure function of the schedule and
//! the range: the same inputs always produce the same occurrences, with the
//! same ids, whatever range was viewed before.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::date_range::{DateRange, week_start};
use crate::frequency::{ParsedFrequency, parse_frequency};
use crate::occurrence::Occurrence;
use crate::schedule::{DEFAULT_DURATION_MINUTES, LeaderSchedule, is_valid_duration};
use crate::time_of_day::parse_time;
use crate::weekday::parse_weekday;

/// A schedule whose day and time have been understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    pub weekday: Weekday,
    pub time: NaiveTime,
    pub frequency: ParsedFrequency,
    pub anchor_date: Option<NaiveDate>,
    pub duration_minutes: i64,
}

impl Recurrence {
    /// Parse the free-text fields of a schedule.
    ///
    /// Returns `None` when the weekday or time can't be parsed. The
    /// frequency never blocks scheduling; unknown text means weekly.
    pub fn from_schedule(schedule: &LeaderSchedule) -> Option<Self> {
        let weekday = parse_weekday(&schedule.weekday_raw)?;
        let time = parse_time(&schedule.time_raw)?;

        let duration_minutes = if is_valid_duration(schedule.duration_minutes) {
            schedule.duration_minutes
        } else {
            tracing::debug!(
                minutes = schedule.duration_minutes,
                "out-of-range meeting duration, using default"
            );
            DEFAULT_DURATION_MINUTES
        };

        Some(Recurrence {
            weekday,
            time,
            frequency: parse_frequency(schedule.frequency_raw.as_deref()),
            anchor_date: schedule.anchor_date,
            duration_minutes,
        })
    }

    /// Meetings starting within `range`, in chronological order.
    pub fn occurrences(&self, leader_id: &str, range: &DateRange) -> Vec<Occurrence> {
        if range.is_empty() {
            return Vec::new();
        }

        let starts = match &self.frequency {
            ParsedFrequency::Weekly { interval_weeks } => self.weekly_starts(*interval_weeks, range),
            ParsedFrequency::WeekOfMonth { weeks } => self.week_of_month_starts(weeks, range),
            ParsedFrequency::MonthlyInterval { interval_months } => {
                self.monthly_starts(*interval_months, range)
            }
        };

        // Month and week alignment can land outside the range at the edges
        starts
            .into_iter()
            .filter(|start| range.contains(start))
            .filter_map(|start| Occurrence::new(leader_id, start, self.duration_minutes))
            .collect()
    }

    fn weekly_starts(&self, interval_weeks: u32, range: &DateRange) -> Vec<NaiveDateTime> {
        let interval = i64::from(interval_weeks.max(1));
        let first_day = range.start.date();

        let offset = (i64::from(self.weekday.num_days_from_monday())
            - i64::from(first_day.weekday().num_days_from_monday()))
        .rem_euclid(7);
        let mut cursor = (first_day + Duration::days(offset)).and_time(self.time);
        if cursor < range.start {
            cursor += Duration::weeks(1);
        }

        if interval > 1 {
            if let Some(anchor) = self.anchor_date {
                let weeks_from_anchor =
                    (week_start(cursor.date()) - week_start(anchor)).num_days() / 7;
                let phase = weeks_from_anchor.rem_euclid(interval);
                if phase != 0 {
                    cursor += Duration::weeks(interval - phase);
                }
            }
        }

        let mut starts = Vec::new();
        while cursor < range.end {
            starts.push(cursor);
            cursor += Duration::weeks(interval);
        }
        starts
    }

    fn week_of_month_starts(
        &self,
        weeks: &std::collections::BTreeSet<u32>,
        range: &DateRange,
    ) -> Vec<NaiveDateTime> {
        let mut starts = Vec::new();

        for month in range.months() {
            let dates = weekday_dates_in_month(month, self.weekday);
            for &week in weeks {
                let index = (week as usize).checked_sub(1);
                match index.and_then(|i| dates.get(i)) {
                    Some(date) => starts.push(date.and_time(self.time)),
                    None => tracing::trace!(
                        month = %month.format("%Y-%m"),
                        week,
                        "no such ordinal weekday in month"
                    ),
                }
            }
        }

        starts
    }

    fn monthly_starts(&self, interval_months: u32, range: &DateRange) -> Vec<NaiveDateTime> {
        let interval = interval_months.max(1) as usize;

        range
            .months()
            .enumerate()
            .filter(|(index, _)| index % interval == 0)
            .filter_map(|(_, month)| {
                weekday_dates_in_month(month, self.weekday)
                    .first()
                    .map(|date| date.and_time(self.time))
            })
            .collect()
    }
}

/// Every date in `month` (given as its first day) falling on `weekday`.
fn weekday_dates_in_month(month: NaiveDate, weekday: Weekday) -> Vec<NaiveDate> {
    let offset = (i64::from(weekday.num_days_from_monday())
        - i64::from(month.weekday().num_days_from_monday()))
    .rem_euclid(7);

    std::iter::successors(Some(month + Duration::days(offset)), |d| {
        Some(*d + Duration::days(7))
    })
    .take_while(|d| d.month() == month.month())
    .collect()
}

/// Generate a leader's meetings within `range`.
///
/// Unparsable weekday or time yields no occurrences rather than an error, so
/// one bad record never blocks everyone else's calendar.
pub fn generate(leader_id: &str, schedule: &LeaderSchedule, range: &DateRange) -> Vec<Occurrence> {
    match Recurrence::from_schedule(schedule) {
        Some(recurrence) => recurrence.occurrences(leader_id, range),
        None => {
            tracing::debug!(
                leader_id,
                day = %schedule.weekday_raw,
                time = %schedule.time_raw,
                "leader schedule has no usable day/time"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(occurrences: &[Occurrence]) -> Vec<NaiveDate> {
        occurrences.iter().map(|o| o.date()).collect()
    }

    fn recurrence(weekday: Weekday, frequency: ParsedFrequency) -> Recurrence {
        Recurrence {
            weekday,
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            frequency,
            anchor_date: None,
            duration_minutes: 60,
        }
    }

    // --- fail-closed / fail-open ---

    #[test]
    fn unparsable_day_yields_nothing() {
        let schedule = LeaderSchedule::new("Funday", "7:00 PM");
        let range = DateRange::from_dates(date(2025, 1, 1), date(2025, 12, 31));
        assert!(generate("x", &schedule, &range).is_empty());
    }

    #[test]
    fn out_of_range_duration_uses_default() {
        let mut schedule = LeaderSchedule::new("Wednesday", "7:00 PM");
        schedule.duration_minutes = i64::MAX;
        let range = DateRange::from_dates(date(2025, 1, 1), date(2025, 1, 7));

        let occurrences = generate("x", &schedule, &range);
        assert_eq!(occurrences.len(), 1);
        assert_eq!((occurrences[0].end - occurrences[0].start).num_minutes(), 60);
    }

    #[test]
    fn unparsable_time_yields_nothing() {
        let schedule = LeaderSchedule::new("Monday", "after dinner");
        let range = DateRange::from_dates(date(2025, 1, 1), date(2025, 12, 31));
        assert!(generate("x", &schedule, &range).is_empty());
    }

    #[test]
    fn missing_frequency_is_weekly() {
        let schedule = LeaderSchedule::new("Monday", "7:00 PM");
        // Four full weeks starting Monday 2025-03-03
        let range = DateRange::from_dates(date(2025, 3, 3), date(2025, 3, 30));
        let occurrences = generate("x", &schedule, &range);
        assert_eq!(
            dates(&occurrences),
            vec![date(2025, 3, 3), date(2025, 3, 10), date(2025, 3, 17), date(2025, 3, 24)]
        );
    }

    // --- weekly ---

    #[test]
    fn weekly_skips_meeting_already_started_on_first_day() {
        let schedule = LeaderSchedule::new("Wed", "19:00");
        let start = date(2025, 3, 5).and_hms_opt(20, 0, 0).unwrap();
        let range = DateRange::new(start, date(2025, 3, 20).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            dates(&generate("x", &schedule, &range)),
            vec![date(2025, 3, 12), date(2025, 3, 19)]
        );
    }

    #[test]
    fn weekly_meeting_exactly_at_range_end_is_excluded() {
        let schedule = LeaderSchedule::new("Wed", "19:00");
        let range = DateRange::new(
            date(2025, 3, 5).and_hms_opt(19, 0, 0).unwrap(),
            date(2025, 3, 12).and_hms_opt(19, 0, 0).unwrap(),
        );
        assert_eq!(dates(&generate("x", &schedule, &range)), vec![date(2025, 3, 5)]);
    }

    #[test]
    fn biweekly_without_anchor_starts_at_first_match() {
        let schedule = LeaderSchedule::new("Thursday", "6 pm").with_frequency(Some("Bi-weekly"));
        let range = DateRange::from_dates(date(2025, 3, 1), date(2025, 3, 31));
        assert_eq!(
            dates(&generate("x", &schedule, &range)),
            vec![date(2025, 3, 6), date(2025, 3, 20)]
        );
    }

    #[test]
    fn biweekly_anchor_parity_is_stable_across_ranges() {
        let schedule = LeaderSchedule::new("Monday", "7:00 PM")
            .with_frequency(Some("every other week"))
            .with_anchor_date(Some(date(2025, 1, 6)));

        let weeks_1_2 = DateRange::from_dates(date(2025, 3, 3), date(2025, 3, 16));
        let weeks_3_4 = DateRange::from_dates(date(2025, 3, 17), date(2025, 3, 30));
        let weeks_2_3 = DateRange::from_dates(date(2025, 3, 10), date(2025, 3, 23));
        let all = DateRange::from_dates(date(2025, 3, 3), date(2025, 3, 30));

        let mut shifted = generate("x", &schedule, &weeks_1_2);
        shifted.extend(generate("x", &schedule, &weeks_3_4));

        assert_eq!(dates(&shifted), vec![date(2025, 3, 3), date(2025, 3, 17)]);
        assert_eq!(shifted, generate("x", &schedule, &all));
        assert_eq!(dates(&generate("x", &schedule, &weeks_2_3)), vec![date(2025, 3, 17)]);
    }

    #[test]
    fn biweekly_anchor_in_the_future_still_sets_parity() {
        let schedule = LeaderSchedule::new("Monday", "7:00 PM")
            .with_frequency(Some("biweekly"))
            .with_anchor_date(Some(date(2025, 6, 11)));
        // Anchor week starts Mon 2025-06-09, 14 weeks after 2025-03-03
        let range = DateRange::from_dates(date(2025, 3, 3), date(2025, 3, 30));
        assert_eq!(
            dates(&generate("x", &schedule, &range)),
            vec![date(2025, 3, 3), date(2025, 3, 17)]
        );
    }

    #[test]
    fn malformed_anchor_falls_back_to_unanchored() {
        let anchored = LeaderSchedule::new("Monday", "7:00 PM")
            .with_frequency(Some("biweekly"))
            .with_anchor_str(Some("not a date"));
        let unanchored = LeaderSchedule::new("Monday", "7:00 PM").with_frequency(Some("biweekly"));
        let range = DateRange::from_dates(date(2025, 3, 10), date(2025, 4, 6));
        assert_eq!(generate("x", &anchored, &range), generate("x", &unanchored, &range));
    }

    // --- week of month ---

    #[test]
    fn first_and_third_wednesday_end_to_end() {
        let schedule = LeaderSchedule::new("Wednesday", "7:00 PM").with_frequency(Some("1st & 3rd"));
        // January 2025 has five Wednesdays: 1, 8, 15, 22, 29
        let range = DateRange::month_of(date(2025, 1, 1));
        let occurrences = generate("jane", &schedule, &range);

        assert_eq!(dates(&occurrences), vec![date(2025, 1, 1), date(2025, 1, 15)]);
        for occ in &occurrences {
            assert_eq!(occ.end - occ.start, Duration::minutes(60));
            assert_eq!(occ.start.time(), NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        }
        assert_eq!(occurrences[0].id, "jane:2025-01-01");
    }

    #[test]
    fn fifth_weekday_missing_in_short_month() {
        let rec = recurrence(
            Weekday::Sat,
            ParsedFrequency::WeekOfMonth {
                weeks: BTreeSet::from([5]),
            },
        );
        // February 2025 has four Saturdays, March 2025 has five
        let feb = DateRange::month_of(date(2025, 2, 1));
        let mar = DateRange::month_of(date(2025, 3, 1));

        assert!(rec.occurrences("x", &feb).is_empty());
        assert_eq!(dates(&rec.occurrences("x", &mar)), vec![date(2025, 3, 29)]);
    }

    #[test]
    fn week_of_month_across_month_boundary() {
        let schedule = LeaderSchedule::new("Tue", "7pm").with_frequency(Some("2nd and 4th"));
        let range = DateRange::from_dates(date(2025, 3, 20), date(2025, 4, 10));
        // March Tuesdays: 4, 11, 18, 25. April: 1, 8, 15, 22, 29
        assert_eq!(
            dates(&generate("x", &schedule, &range)),
            vec![date(2025, 3, 25), date(2025, 4, 8)]
        );
    }

    // --- month intervals ---

    #[test]
    fn monthly_takes_first_weekday() {
        let schedule = LeaderSchedule::new("Friday", "12:00").with_frequency(Some("Monthly"));
        let range = DateRange::from_dates(date(2025, 1, 1), date(2025, 3, 31));
        assert_eq!(
            dates(&generate("x", &schedule, &range)),
            vec![date(2025, 1, 3), date(2025, 2, 7), date(2025, 3, 7)]
        );
    }

    #[test]
    fn quarterly_counts_months_from_range_start() {
        let schedule = LeaderSchedule::new("Wednesday", "7:00 PM").with_frequency(Some("Quarterly"));
        let range = DateRange::from_dates(date(2025, 1, 1), date(2025, 6, 30));
        assert_eq!(
            dates(&generate("x", &schedule, &range)),
            vec![date(2025, 1, 1), date(2025, 4, 2)]
        );
    }

    #[test]
    fn monthly_first_weekday_before_range_start_is_dropped() {
        let schedule = LeaderSchedule::new("Friday", "12:00").with_frequency(Some("monthly"));
        let range = DateRange::from_dates(date(2025, 1, 10), date(2025, 2, 28));
        assert_eq!(dates(&generate("x", &schedule, &range)), vec![date(2025, 2, 7)]);
    }

    // --- properties ---

    #[test]
    fn generation_is_deterministic() {
        let schedule = LeaderSchedule::new("Thursday", "7:30 pm")
            .with_frequency(Some("biweekly"))
            .with_anchor_date(Some(date(2024, 9, 5)));
        let range = DateRange::from_dates(date(2025, 1, 1), date(2025, 12, 31));
        assert_eq!(generate("x", &schedule, &range), generate("x", &schedule, &range));
    }

    #[test]
    fn every_occurrence_is_inside_range_and_sorted() {
        let range = DateRange::new(
            date(2025, 2, 12).and_hms_opt(8, 0, 0).unwrap(),
            date(2025, 5, 20).and_hms_opt(18, 0, 0).unwrap(),
        );
        for frequency in [None, Some("biweekly"), Some("1st & 3rd"), Some("monthly"), Some("quarterly")] {
            for day in ["Mon", "Wed", "Sat"] {
                let schedule = LeaderSchedule::new(day, "18:00").with_frequency(frequency);
                let occurrences = generate("x", &schedule, &range);
                assert!(occurrences.iter().all(|o| range.contains(&o.start)), "{day} {frequency:?}");
                assert!(occurrences.windows(2).all(|w| w[0].start <= w[1].start));
            }
        }
    }

    #[test]
    fn ids_survive_range_changes() {
        let schedule = LeaderSchedule::new("Monday", "7:00 PM");
        let march = generate("x", &schedule, &DateRange::month_of(date(2025, 3, 1)));
        let week = generate("x", &schedule, &DateRange::week_of(date(2025, 3, 12)));
        assert_eq!(week.len(), 1);
        assert!(march.iter().any(|o| o.id == week[0].id));
    }

    #[test]
    fn engine_types_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LeaderSchedule>();
        assert_send_sync::<Recurrence>();
        assert_send_sync::<Occurrence>();
        assert_send_sync::<DateRange>();
    }

    #[test]
    fn empty_range() {
        let schedule = LeaderSchedule::new("Monday", "7:00 PM");
        let at = date(2025, 3, 3).and_hms_opt(0, 0, 0).unwrap();
        assert!(generate("x", &schedule, &DateRange::new(at, at)).is_empty());
    }
}

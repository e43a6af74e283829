//! Calendar-day helpers shared by the progress computations.

use chrono::{Datelike, Days, NaiveDate};

/// Storage format for calendar days.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Short axis label, e.g. `Oct 3`.
const LABEL_FORMAT: &str = "%b %-d";

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).ok()
}

pub fn chart_label(day: NaiveDate) -> String {
    day.format(LABEL_FORMAT).to_string()
}

/// Sunday on or before `day`.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    let offset = u64::from(day.weekday().num_days_from_sunday());
    day.checked_sub_days(Days::new(offset)).unwrap_or(day)
}

pub fn days_before(day: NaiveDate, count: u64) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(count))
}

pub fn days_after(day: NaiveDate, count: u64) -> Option<NaiveDate> {
    day.checked_add_days(Days::new(count))
}

pub fn weeks_after(day: NaiveDate, weeks: u32) -> Option<NaiveDate> {
    days_after(day, u64::from(weeks) * 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_and_parse_are_inverse() {
        let days = [
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
        ];
        for day in days {
            assert_eq!(parse_day(&format_day(day)), Some(day));
        }
        assert_eq!(format_day(parse_day("2026-10-19").unwrap()), "2026-10-19");
    }

    #[test]
    fn chart_label_drops_leading_zero() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        assert_eq!(chart_label(day), "Oct 3");
    }

    #[test]
    fn start_of_week_is_sunday() {
        // 2026-10-21 is a Wednesday.
        let wednesday = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
        assert_eq!(
            start_of_week(wednesday),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
        );
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(start_of_week(sunday), sunday);
    }
}

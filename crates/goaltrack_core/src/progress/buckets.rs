//! Bar-chart aggregation for duration and frequency goals.

use super::dates::{chart_label, days_after, days_before, format_day, start_of_week};
use crate::config::{DURATION_WINDOW_DAYS, FREQUENCY_WINDOW_DAYS};
use crate::model::{Entry, FrequencyConfig, FrequencyTimeframe};
use chrono::NaiveDate;
use log::debug;
use serde::{Serialize, Serializer};

/// One bar: a day or a week starting at `start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub label: String,
    #[serde(serialize_with = "serialize_day")]
    pub start: NaiveDate,
    pub value: f64,
}

/// Daily totals for the trailing window ending today, oldest first.
///
/// Every entry dated on a day contributes; days without entries are zero.
pub fn duration_buckets(entries: &[Entry], today: NaiveDate) -> Vec<Bucket> {
    (0..DURATION_WINDOW_DAYS)
        .rev()
        .filter_map(|offset| days_before(today, u64::from(offset)))
        .map(|day| Bucket {
            label: chart_label(day),
            start: day,
            value: entries
                .iter()
                .filter(|entry| entry.date == day)
                .filter_map(|entry| entry.value.as_number())
                .sum(),
        })
        .collect()
}

/// Weekly entry counts for every Sunday-start week overlapping the trailing
/// window. Daily and monthly timeframes are not bucketed and yield nothing.
pub fn frequency_buckets(config: &FrequencyConfig, entries: &[Entry], today: NaiveDate) -> Vec<Bucket> {
    if config.timeframe != FrequencyTimeframe::Weekly {
        debug!(
            "event=frequency_aggregate module=progress status=skipped timeframe={}",
            config.timeframe
        );
        return Vec::new();
    }

    let window_start = days_before(today, u64::from(FREQUENCY_WINDOW_DAYS)).unwrap_or(today);
    let last_week = start_of_week(today);
    let mut week_start = start_of_week(window_start);
    let mut buckets = Vec::new();

    while week_start <= last_week {
        let week_end = days_after(week_start, 6).unwrap_or(week_start);
        let count = entries
            .iter()
            .filter(|entry| entry.date >= week_start && entry.date <= week_end)
            .count();
        buckets.push(Bucket {
            label: chart_label(week_start),
            start: week_start,
            value: count as f64,
        });
        match days_after(week_start, 7) {
            Some(next) => week_start = next,
            None => break,
        }
    }
    buckets
}

pub fn all_zero(buckets: &[Bucket]) -> bool {
    buckets.iter().all(|bucket| bucket.value == 0.0)
}

fn serialize_day<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_day(*day))
}

//! Numeric goal series, linear projection and y-axis domain.
//!
//! # Invariants
//! - Actual points come from entries sorted ascending by date.
//! - Projected points never carry an actual value; only the last actual
//!   point carries both, so the two lines meet without being interpolated.
//! - Axis bounds always include every actual value.

use super::dates::{chart_label, format_day, weeks_after};
use crate::config::{AXIS_PADDING_RATIO, AXIS_TICK_COUNT, PROJECTION_WEEKS};
use crate::model::{Direction, Entry, Milestone, NumericConfig};
use chrono::NaiveDate;
use log::debug;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericPoint {
    /// Axis label, e.g. `Oct 3`.
    pub label: String,
    #[serde(serialize_with = "serialize_day")]
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<f64>,
}

impl NumericPoint {
    fn actual(date: NaiveDate, value: f64) -> Self {
        Self {
            label: chart_label(date),
            date,
            value: Some(value),
            projection: None,
        }
    }

    fn projected(date: NaiveDate, projection: f64) -> Self {
        Self {
            label: chart_label(date),
            date,
            value: None,
            projection: Some(projection),
        }
    }
}

/// Builds the actual series and, when a weekly rate is configured, the
/// twelve-week projection continuing from the last actual point.
///
/// Non-numeric entry values are skipped.
pub fn numeric_series(config: &NumericConfig, entries: &[Entry]) -> Vec<NumericPoint> {
    let mut actual: Vec<(NaiveDate, f64)> = entries
        .iter()
        .filter_map(|entry| entry.value.as_number().map(|value| (entry.date, value)))
        .collect();
    actual.sort_by_key(|(date, _)| *date);

    let mut points: Vec<NumericPoint> = actual
        .into_iter()
        .map(|(date, value)| NumericPoint::actual(date, value))
        .collect();

    let Some(rate) = config.projection_rate() else {
        return points;
    };
    let Some(last) = points.last_mut() else {
        return points;
    };
    let (Some(last_value), last_date) = (last.value, last.date) else {
        return points;
    };
    last.projection = Some(last_value);

    for week in 1..=PROJECTION_WEEKS {
        let Some(date) = weeks_after(last_date, week) else {
            break;
        };
        points.push(NumericPoint::projected(
            date,
            last_value + rate * f64::from(week),
        ));
    }
    points
}

/// Visible value range of the numeric chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
    /// Label values across `min..=max`, rounded with [`nice_tick`].
    pub ticks: Vec<f64>,
}

impl AxisDomain {
    fn spanning(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ticks: axis_ticks(min, max),
        }
    }
}

/// Computes the y-axis domain from actual values, target, milestones and
/// projection. Returns `None` when there are no actual values.
pub fn axis_domain(
    config: &NumericConfig,
    milestones: &[Milestone],
    points: &[NumericPoint],
) -> Option<AxisDomain> {
    let actual: Vec<f64> = points.iter().filter_map(|point| point.value).collect();
    let actual_max = max_of(&actual)?;

    let candidates: Vec<f64> = actual
        .iter()
        .copied()
        .chain(config.reference_target())
        .chain(milestones.iter().map(|milestone| milestone.value))
        .chain(points.iter().filter_map(|point| point.projection))
        .collect();
    let data_max = max_of(&candidates)?;
    let data_min = min_of(&candidates)?;
    let padding = (data_max - data_min) * AXIS_PADDING_RATIO;

    let floor = config.target.unwrap_or(0.0);
    let min = floor.min(data_min - padding);
    let max = match config.direction {
        Direction::Decrease => actual_max + padding,
        Direction::Increase => data_max + padding,
    };

    if min >= max {
        debug!(
            "event=axis_domain_fallback module=progress min={} max={}",
            min, max
        );
        return Some(AxisDomain::spanning(data_min - padding, data_max + padding));
    }
    Some(AxisDomain::spanning(min, max))
}

/// Tick step used for a value of this magnitude.
pub fn nice_step(value: f64) -> f64 {
    let magnitude = value.abs();
    if magnitude < 20.0 {
        5.0
    } else if magnitude < 100.0 {
        10.0
    } else if magnitude < 500.0 {
        25.0
    } else {
        50.0
    }
}

/// Rounds a tick value to its nice step, halves rounding up.
pub fn nice_tick(value: f64) -> f64 {
    let step = nice_step(value);
    (value / step + 0.5).floor() * step
}

/// `AXIS_TICK_COUNT` evenly spaced labels from `min` to `max`, each rounded
/// to its nice step. Labels that round together appear once.
pub fn axis_ticks(min: f64, max: f64) -> Vec<f64> {
    let intervals = (AXIS_TICK_COUNT - 1) as f64;
    let mut ticks: Vec<f64> = (0..AXIS_TICK_COUNT)
        .map(|index| nice_tick(min + (max - min) * index as f64 / intervals))
        .collect();
    ticks.dedup();
    ticks
}

fn max_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn min_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn serialize_day<S: Serializer>(day: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_day(*day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::dates::parse_day;
    use chrono::Utc;

    fn config(direction: Direction, target: Option<f64>, rate: Option<f64>) -> NumericConfig {
        NumericConfig {
            unit: "lbs".to_string(),
            target,
            start_value: None,
            direction,
            target_rate: rate,
        }
    }

    fn entry(day: &str, value: f64) -> Entry {
        Entry::new("weight", parse_day(day).unwrap(), Utc::now(), value)
    }

    #[test]
    fn series_is_sorted_by_date() {
        let entries = vec![entry("2026-10-10", 182.0), entry("2026-10-01", 185.0)];
        let points = numeric_series(&config(Direction::Decrease, None, None), &entries);
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(185.0), Some(182.0)]);
        assert_eq!(points[0].label, "Oct 1");
    }

    #[test]
    fn projection_continues_weekly_from_last_point() {
        let entries = vec![entry("2026-09-01", 190.0), entry("2026-10-01", 180.0)];
        let points = numeric_series(&config(Direction::Decrease, None, Some(-2.0)), &entries);

        assert_eq!(points.len(), 2 + 12);
        assert_eq!(points[0].projection, None);
        assert_eq!(points[1].value, Some(180.0));
        assert_eq!(points[1].projection, Some(180.0));

        let first = &points[2];
        assert_eq!(first.date, parse_day("2026-10-08").unwrap());
        assert_eq!(first.projection, Some(178.0));
        assert_eq!(first.value, None);

        let last = points.last().unwrap();
        assert_eq!(last.date, parse_day("2026-12-24").unwrap());
        assert_eq!(last.projection, Some(156.0));
    }

    #[test]
    fn projected_dates_parse_back_to_the_same_day() {
        let entries = vec![entry("2026-10-01", 180.0)];
        let points = numeric_series(&config(Direction::Decrease, None, Some(-2.0)), &entries);
        for point in points {
            let text = format_day(point.date);
            assert_eq!(parse_day(&text), Some(point.date));
        }
    }

    #[test]
    fn decrease_domain_spans_target_and_actual_max() {
        let entries = vec![entry("2026-10-01", 180.0), entry("2026-10-08", 150.0)];
        let config = config(Direction::Decrease, Some(140.0), None);
        let points = numeric_series(&config, &entries);
        let domain = axis_domain(&config, &[], &points).unwrap();

        assert!(domain.min <= 140.0);
        assert!(domain.max >= 180.0);
        assert!((domain.min - 136.0).abs() < 1e-9);
        assert!((domain.max - 184.0).abs() < 1e-9);
    }

    #[test]
    fn increase_domain_includes_milestones_and_projection() {
        let entries = vec![entry("2026-10-01", 10.0)];
        let config = config(Direction::Increase, None, Some(5.0));
        let points = numeric_series(&config, &entries);
        let milestones = vec![Milestone::new(100.0, "century")];
        let domain = axis_domain(&config, &milestones, &points).unwrap();

        // candidates 10..=100, padding 9
        assert_eq!(domain.min, 0.0);
        assert!((domain.max - 109.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_falls_back_to_padded_range() {
        let entries = vec![entry("2026-10-01", -5.0)];
        let config = config(Direction::Decrease, None, None);
        let points = numeric_series(&config, &entries);
        let domain = axis_domain(&config, &[], &points).unwrap();
        assert_eq!(domain.min, -5.0);
        assert_eq!(domain.max, -5.0);
        assert_eq!(domain.ticks, vec![-5.0]);
    }

    #[test]
    fn no_actual_values_has_no_domain() {
        let config = config(Direction::Increase, Some(10.0), Some(1.0));
        assert!(numeric_series(&config, &[]).is_empty());
        assert_eq!(axis_domain(&config, &[], &[]), None);
    }

    #[test]
    fn nice_tick_uses_magnitude_steps() {
        assert_eq!(nice_tick(12.4), 10.0);
        assert_eq!(nice_tick(12.5), 15.0);
        assert_eq!(nice_tick(47.0), 50.0);
        assert_eq!(nice_tick(137.0), 125.0);
        assert_eq!(nice_tick(612.0), 600.0);
        assert_eq!(nice_tick(-2.5), 0.0);
    }

    #[test]
    fn ticks_span_the_domain_on_nice_steps() {
        assert_eq!(axis_ticks(136.0, 184.0), vec![125.0, 150.0, 175.0]);
        assert_eq!(axis_ticks(0.0, 109.0), vec![0.0, 30.0, 50.0, 80.0, 100.0]);
    }
}

//! Per-goal-type dispatch table.
//!
//! Each goal type supplies one `GoalStrategy`; callers go through
//! [`strategy_for`] instead of branching on the type themselves.

use super::adherence::{adherence_stats, calendar_grid, AdherenceStats, CalendarCell, CalendarMonth};
use super::buckets::{all_zero, duration_buckets, frequency_buckets, Bucket};
use super::numeric::{axis_domain, numeric_series, AxisDomain, NumericPoint};
use super::status::{entry_on, latest_entry, GoalStatus};
use crate::model::{DurationTimeframe, Entry, Goal, GoalConfig, GoalType};
use chrono::NaiveDate;
use serde::Serialize;

/// Inputs shared by every strategy call besides the goal and its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressContext {
    pub today: NaiveDate,
    /// Month shown by the adherence calendar.
    pub month: CalendarMonth,
}

impl ProgressContext {
    /// Context showing the month that contains `today`.
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            today,
            month: CalendarMonth::containing(today),
        }
    }
}

/// Horizontal reference line on a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
    /// Milestones only: whether the milestone is marked achieved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved: Option<bool>,
}

impl ReferenceLine {
    fn target(value: f64) -> Self {
        Self {
            value,
            label: format!("Target: {value}"),
            achieved: None,
        }
    }
}

/// Chart-ready series for one goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GoalChart {
    /// Nothing worth drawing.
    NoData,
    #[serde(rename_all = "camelCase")]
    Line {
        points: Vec<NumericPoint>,
        references: Vec<ReferenceLine>,
    },
    #[serde(rename_all = "camelCase")]
    Calendar {
        month: CalendarMonth,
        title: String,
        cells: Vec<CalendarCell>,
    },
    #[serde(rename_all = "camelCase")]
    Bars {
        buckets: Vec<Bucket>,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<ReferenceLine>,
    },
}

/// Per-type computations. Entries are pre-filtered to the goal.
pub trait GoalStrategy: Sync {
    fn status(&self, goal: &Goal, entries: &[Entry], ctx: &ProgressContext) -> GoalStatus;

    fn aggregate(&self, goal: &Goal, entries: &[Entry], ctx: &ProgressContext) -> GoalChart;

    fn axis_domain(&self, _goal: &Goal, _chart: &GoalChart) -> Option<AxisDomain> {
        None
    }

    fn adherence(&self, _entries: &[Entry], _ctx: &ProgressContext) -> Option<AdherenceStats> {
        None
    }
}

struct NumericStrategy;
struct AdherenceStrategy;
struct FrequencyStrategy;
struct DurationStrategy;

static NUMERIC: NumericStrategy = NumericStrategy;
static ADHERENCE: AdherenceStrategy = AdherenceStrategy;
static FREQUENCY: FrequencyStrategy = FrequencyStrategy;
static DURATION: DurationStrategy = DurationStrategy;

pub fn strategy_for(kind: GoalType) -> &'static dyn GoalStrategy {
    match kind {
        GoalType::Numeric => &NUMERIC,
        GoalType::Adherence => &ADHERENCE,
        GoalType::Frequency => &FREQUENCY,
        GoalType::Duration => &DURATION,
    }
}

fn latest_status(goal: &Goal, entries: &[Entry]) -> GoalStatus {
    match latest_entry(entries) {
        Some(entry) => GoalStatus::Latest {
            value: entry.value,
            unit: goal.config.unit_label().unwrap_or_default().to_string(),
        },
        None => GoalStatus::NoEntries,
    }
}

impl GoalStrategy for NumericStrategy {
    fn status(&self, goal: &Goal, entries: &[Entry], _ctx: &ProgressContext) -> GoalStatus {
        latest_status(goal, entries)
    }

    fn aggregate(&self, goal: &Goal, entries: &[Entry], _ctx: &ProgressContext) -> GoalChart {
        let Some(config) = goal.numeric_config() else {
            return GoalChart::NoData;
        };
        let points = numeric_series(config, entries);
        if points.iter().all(|point| point.value.is_none()) {
            return GoalChart::NoData;
        }

        let mut references: Vec<ReferenceLine> = config
            .reference_target()
            .map(ReferenceLine::target)
            .into_iter()
            .collect();
        references.extend(goal.milestones.iter().map(|milestone| ReferenceLine {
            value: milestone.value,
            label: milestone.label.clone(),
            achieved: Some(milestone.is_achieved()),
        }));

        GoalChart::Line { points, references }
    }

    fn axis_domain(&self, goal: &Goal, chart: &GoalChart) -> Option<AxisDomain> {
        let (Some(config), GoalChart::Line { points, .. }) = (goal.numeric_config(), chart) else {
            return None;
        };
        axis_domain(config, &goal.milestones, points)
    }
}

impl GoalStrategy for AdherenceStrategy {
    fn status(&self, _goal: &Goal, entries: &[Entry], ctx: &ProgressContext) -> GoalStatus {
        if entries.is_empty() {
            return GoalStatus::NoEntries;
        }
        let done_today = entry_on(entries, ctx.today)
            .map(|entry| entry.value.is_completed())
            .unwrap_or(false);
        GoalStatus::Adherence { done_today }
    }

    fn aggregate(&self, _goal: &Goal, entries: &[Entry], ctx: &ProgressContext) -> GoalChart {
        GoalChart::Calendar {
            month: ctx.month,
            title: ctx.month.title(),
            cells: calendar_grid(entries, ctx.month, ctx.today),
        }
    }

    fn adherence(&self, entries: &[Entry], ctx: &ProgressContext) -> Option<AdherenceStats> {
        Some(adherence_stats(entries, ctx.month, ctx.today))
    }
}

impl GoalStrategy for FrequencyStrategy {
    fn status(&self, goal: &Goal, entries: &[Entry], _ctx: &ProgressContext) -> GoalStatus {
        match &goal.config {
            GoalConfig::Frequency(config) if !entries.is_empty() => GoalStatus::Count {
                count: entries.len(),
                timeframe: config.timeframe,
            },
            _ => GoalStatus::NoEntries,
        }
    }

    fn aggregate(&self, goal: &Goal, entries: &[Entry], ctx: &ProgressContext) -> GoalChart {
        let GoalConfig::Frequency(config) = &goal.config else {
            return GoalChart::NoData;
        };
        let buckets = frequency_buckets(config, entries, ctx.today);
        if buckets.is_empty() {
            return GoalChart::NoData;
        }
        GoalChart::Bars {
            buckets,
            target: Some(ReferenceLine::target(f64::from(config.target_count))),
        }
    }
}

impl GoalStrategy for DurationStrategy {
    fn status(&self, goal: &Goal, entries: &[Entry], _ctx: &ProgressContext) -> GoalStatus {
        latest_status(goal, entries)
    }

    fn aggregate(&self, goal: &Goal, entries: &[Entry], ctx: &ProgressContext) -> GoalChart {
        let GoalConfig::Duration(config) = &goal.config else {
            return GoalChart::NoData;
        };
        let buckets = duration_buckets(entries, ctx.today);
        if all_zero(&buckets) {
            return GoalChart::NoData;
        }
        let target = match config.timeframe {
            DurationTimeframe::Daily => Some(ReferenceLine::target(config.target_duration)),
            DurationTimeframe::Weekly => None,
        };
        GoalChart::Bars { buckets, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdherenceConfig, Direction, FrequencyConfig, FrequencyTimeframe, NumericConfig};
    use crate::progress::dates::parse_day;
    use chrono::{TimeZone, Utc};

    fn ctx() -> ProgressContext {
        ProgressContext::for_today(parse_day("2026-10-19").unwrap())
    }

    #[test]
    fn every_type_has_a_strategy_with_empty_input_states() {
        let configs = [
            GoalConfig::Numeric(NumericConfig {
                unit: "kg".to_string(),
                target: Some(70.0),
                start_value: None,
                direction: Direction::Decrease,
                target_rate: Some(-0.5),
            }),
            GoalConfig::Adherence(AdherenceConfig::default()),
            GoalConfig::Frequency(FrequencyConfig {
                target_count: 3,
                timeframe: FrequencyTimeframe::Weekly,
            }),
            GoalConfig::Duration(crate::model::DurationConfig {
                unit: crate::model::DurationUnit::Minutes,
                target_duration: 30.0,
                timeframe: DurationTimeframe::Daily,
            }),
        ];
        for config in configs {
            let goal = Goal::new("g", config, Utc::now());
            let strategy = strategy_for(goal.kind);
            assert_eq!(strategy.status(&goal, &[], &ctx()), GoalStatus::NoEntries);
            let chart = strategy.aggregate(&goal, &[], &ctx());
            assert_eq!(strategy.axis_domain(&goal, &chart), None);
        }
    }

    #[test]
    fn numeric_status_reports_latest_by_timestamp() {
        let goal = Goal::new(
            "weight",
            GoalConfig::Numeric(NumericConfig {
                unit: "lbs".to_string(),
                target: None,
                start_value: None,
                direction: Direction::Decrease,
                target_rate: None,
            }),
            Utc::now(),
        );
        let day = parse_day("2026-10-18").unwrap();
        let older = Entry::new(&goal.id, day, Utc.with_ymd_and_hms(2026, 10, 18, 7, 0, 0).unwrap(), 181.0);
        let newer = Entry::new(&goal.id, day, Utc.with_ymd_and_hms(2026, 10, 18, 21, 0, 0).unwrap(), 180.0);
        let status = strategy_for(goal.kind).status(&goal, &[newer, older], &ctx());
        assert_eq!(status.to_string(), "180 lbs");
    }

    #[test]
    fn adherence_status_checks_today_only() {
        let goal = Goal::new("floss", GoalConfig::Adherence(AdherenceConfig::default()), Utc::now());
        let yesterday = Entry::new(&goal.id, parse_day("2026-10-18").unwrap(), Utc::now(), true);
        let strategy = strategy_for(goal.kind);
        assert_eq!(
            strategy.status(&goal, &[yesterday.clone()], &ctx()).to_string(),
            "Not done today"
        );
        let today = Entry::new(&goal.id, ctx().today, Utc::now(), true);
        assert_eq!(
            strategy.status(&goal, &[yesterday, today], &ctx()).to_string(),
            "Done today"
        );
    }
}

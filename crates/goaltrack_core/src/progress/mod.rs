//! Progress engine: status, aggregation and statistics for goals.
//!
//! # Responsibility
//! - Turn a goal plus its entries into chart series and summary numbers.
//! - Dispatch on goal type through one strategy per type.
//!
//! # Invariants
//! - Every computation is pure over its inputs; "today" comes from a `Clock`.
//! - Malformed or mismatched values degrade to "no data", never to an error.
//! - Calendar arithmetic stays on `NaiveDate`; no timezone shifts.

pub mod adherence;
pub mod buckets;
pub mod dates;
pub mod engine;
pub mod numeric;
pub mod status;
pub mod strategy;

pub use adherence::{
    adherence_stats, calendar_grid, completion_rate, streak, AdherenceStats, CalendarCell,
    CalendarMonth, DayCell, DayStatus,
};
pub use buckets::{duration_buckets, frequency_buckets, Bucket};
pub use engine::{GoalProgress, ProgressEngine};
pub use numeric::{axis_domain, nice_step, nice_tick, numeric_series, AxisDomain, NumericPoint};
pub use status::{latest_entry, GoalStatus};
pub use strategy::{strategy_for, GoalChart, GoalStrategy, ProgressContext, ReferenceLine};

use crate::model::{Entry, Goal};

/// Entries belonging to `goal`, in stored order.
pub fn entries_for_goal(goal: &Goal, entries: &[Entry]) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.goal_id == goal.id)
        .cloned()
        .collect()
}

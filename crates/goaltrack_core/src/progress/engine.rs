//! Engine facade over the per-type strategies.

use super::adherence::{calendar_grid, AdherenceStats, CalendarCell, CalendarMonth};
use super::numeric::AxisDomain;
use super::status::GoalStatus;
use super::strategy::{strategy_for, GoalChart, ProgressContext};
use crate::clock::Clock;
use crate::model::{Entry, Goal, GoalId};
use log::debug;
use serde::Serialize;

/// Everything a goal detail view needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: GoalId,
    pub status: GoalStatus,
    /// `status` rendered as display text.
    pub status_line: String,
    pub entry_count: usize,
    pub chart: GoalChart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisDomain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adherence: Option<AdherenceStats>,
}

/// Pure progress computations with an injected clock.
///
/// Every method expects `entries` already filtered to the goal; see
/// [`entries_for_goal`](super::entries_for_goal).
#[derive(Debug, Clone)]
pub struct ProgressEngine<C> {
    clock: C,
}

impl<C: Clock> ProgressEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    fn context(&self, month: Option<CalendarMonth>) -> ProgressContext {
        let today = self.clock.today();
        ProgressContext {
            today,
            month: month.unwrap_or_else(|| CalendarMonth::containing(today)),
        }
    }

    pub fn status(&self, goal: &Goal, entries: &[Entry]) -> GoalStatus {
        strategy_for(goal.kind).status(goal, entries, &self.context(None))
    }

    /// Streak and completion rate; `None` for non-adherence goals.
    pub fn adherence_stats(
        &self,
        goal: &Goal,
        entries: &[Entry],
        month: Option<CalendarMonth>,
    ) -> Option<AdherenceStats> {
        strategy_for(goal.kind).adherence(entries, &self.context(month))
    }

    pub fn calendar(&self, entries: &[Entry], month: CalendarMonth) -> Vec<CalendarCell> {
        calendar_grid(entries, month, self.clock.today())
    }

    pub fn chart(&self, goal: &Goal, entries: &[Entry], month: Option<CalendarMonth>) -> GoalChart {
        strategy_for(goal.kind).aggregate(goal, entries, &self.context(month))
    }

    pub fn progress(
        &self,
        goal: &Goal,
        entries: &[Entry],
        month: Option<CalendarMonth>,
    ) -> GoalProgress {
        let strategy = strategy_for(goal.kind);
        let ctx = self.context(month);
        let status = strategy.status(goal, entries, &ctx);
        let chart = strategy.aggregate(goal, entries, &ctx);
        let axis = strategy.axis_domain(goal, &chart);
        let adherence = strategy.adherence(entries, &ctx);

        debug!(
            "event=progress_compute module=progress status=ok goal_type={} entries={} today={}",
            goal.kind,
            entries.len(),
            ctx.today
        );

        GoalProgress {
            goal_id: goal.id.clone(),
            status_line: status.to_string(),
            status,
            entry_count: entries.len(),
            chart,
            axis,
            adherence,
        }
    }
}

//! Goal use-case service.
//!
//! # Responsibility
//! - Provide goal CRUD plus milestone replacement.
//! - Run the progress engine over a goal and its stored entries.
//!
//! # Invariants
//! - Deleting a goal never deletes its entries.
//! - Saved milestones always have a non-blank label and a non-zero value.

use crate::clock::Clock;
use crate::model::{Entry, Goal, Milestone};
use crate::progress::{entries_for_goal, CalendarMonth, GoalProgress, ProgressEngine};
use crate::repo::{RecordRepository, RepoError, RepoResult};
use crate::store::CollectionStore;
use log::info;

/// Goal service facade over goal and entry repositories.
pub struct GoalService<G, E, C> {
    goals: RecordRepository<G, Goal>,
    entries: RecordRepository<E, Entry>,
    engine: ProgressEngine<C>,
}

impl<S, C> GoalService<S, S, C>
where
    S: CollectionStore<Goal> + CollectionStore<Entry> + Clone,
    C: Clock,
{
    /// Builds the service over one store holding both collections.
    pub fn from_store(store: &S, clock: C) -> Self {
        Self::new(
            RecordRepository::new(store.clone()),
            RecordRepository::new(store.clone()),
            clock,
        )
    }
}

impl<G, E, C> GoalService<G, E, C>
where
    G: CollectionStore<Goal>,
    E: CollectionStore<Entry>,
    C: Clock,
{
    pub fn new(
        goals: RecordRepository<G, Goal>,
        entries: RecordRepository<E, Entry>,
        clock: C,
    ) -> Self {
        Self {
            goals,
            entries,
            engine: ProgressEngine::new(clock),
        }
    }

    pub fn list_goals(&self) -> RepoResult<Vec<Goal>> {
        self.goals.list()
    }

    pub fn get_goal(&self, id: &str) -> RepoResult<Goal> {
        self.goals.get(id)
    }

    pub fn create_goal(&self, goal: Goal) -> RepoResult<Goal> {
        let goal = self.goals.create(goal)?;
        info!(
            "event=goal_create module=service status=ok goal_id={} goal_type={}",
            goal.id, goal.kind
        );
        Ok(goal)
    }

    /// Replaces the stored goal with `goal` (full-record semantics).
    pub fn update_goal(&self, id: &str, goal: Goal) -> RepoResult<Goal> {
        let goal = self.goals.replace(id, goal)?;
        info!("event=goal_update module=service status=ok goal_id={}", goal.id);
        Ok(goal)
    }

    /// Deletes one goal. Its entries stay in storage.
    pub fn delete_goal(&self, id: &str) -> RepoResult<()> {
        if !self.goals.delete(id)? {
            return Err(RepoError::not_found::<Goal>(id));
        }
        info!("event=goal_delete module=service status=ok goal_id={id}");
        Ok(())
    }

    /// Replaces the goal's milestone list, dropping blank or zero-valued rows.
    pub fn set_milestones(&self, id: &str, milestones: Vec<Milestone>) -> RepoResult<Goal> {
        let submitted = milestones.len();
        let kept: Vec<Milestone> = milestones
            .into_iter()
            .filter(|milestone| !milestone.label.trim().is_empty() && milestone.value != 0.0)
            .collect();

        let mut goal = self.goals.get(id)?;
        goal.milestones = kept;
        let goal = self.goals.replace(id, goal)?;
        info!(
            "event=milestones_set module=service status=ok goal_id={} kept={} dropped={}",
            goal.id,
            goal.milestones.len(),
            submitted - goal.milestones.len()
        );
        Ok(goal)
    }

    /// Entries of one goal, in stored order.
    pub fn goal_entries(&self, goal: &Goal) -> RepoResult<Vec<Entry>> {
        Ok(entries_for_goal(goal, &self.entries.list()?))
    }

    /// Progress view for one goal; `month` selects the adherence calendar.
    pub fn progress(&self, id: &str, month: Option<CalendarMonth>) -> RepoResult<GoalProgress> {
        let goal = self.goals.get(id)?;
        let entries = self.goal_entries(&goal)?;
        Ok(self.engine.progress(&goal, &entries, month))
    }

    /// Progress for every goal, in stored goal order.
    pub fn overview(&self) -> RepoResult<Vec<(Goal, GoalProgress)>> {
        let goals = self.goals.list()?;
        let entries = self.entries.list()?;
        Ok(goals
            .into_iter()
            .map(|goal| {
                let own = entries_for_goal(&goal, &entries);
                let progress = self.engine.progress(&goal, &own, None);
                (goal, progress)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::{AdherenceConfig, GoalConfig};
    use crate::progress::dates::parse_day;
    use crate::store::MemoryStore;
    use chrono::Utc;

    type Service = GoalService<MemoryStore<Goal>, MemoryStore<Entry>, FixedClock>;

    fn service() -> (Service, MemoryStore<Entry>) {
        let entries = MemoryStore::default();
        let service = GoalService::new(
            RecordRepository::new(MemoryStore::default()),
            RecordRepository::new(entries.clone()),
            FixedClock::on(parse_day("2026-10-19").unwrap()),
        );
        (service, entries)
    }

    fn habit() -> Goal {
        Goal::new("meditate", GoalConfig::Adherence(AdherenceConfig::default()), Utc::now())
    }

    #[test]
    fn delete_goal_keeps_entries_and_reports_missing() {
        let (service, entries) = service();
        let goal = service.create_goal(habit()).unwrap();
        entries
            .save(&[Entry::new(&goal.id, parse_day("2026-10-19").unwrap(), Utc::now(), true)])
            .unwrap();

        service.delete_goal(&goal.id).unwrap();
        assert!(service.delete_goal(&goal.id).unwrap_err().is_not_found());
        assert_eq!(CollectionStore::<Entry>::load(&entries).unwrap().len(), 1);
    }

    #[test]
    fn set_milestones_drops_blank_and_zero_rows() {
        let (service, _) = service();
        let goal = service.create_goal(habit()).unwrap();
        let goal = service
            .set_milestones(
                &goal.id,
                vec![
                    Milestone::new(10.0, "ten"),
                    Milestone::new(0.0, "zero"),
                    Milestone::new(20.0, "  "),
                ],
            )
            .unwrap();
        let labels: Vec<_> = goal.milestones.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["ten"]);
    }

    #[test]
    fn progress_uses_only_the_goals_entries() {
        let (service, entries) = service();
        let goal = service.create_goal(habit()).unwrap();
        let today = parse_day("2026-10-19").unwrap();
        entries
            .save(&[
                Entry::new(&goal.id, today, Utc::now(), true),
                Entry::new("someone-else", today, Utc::now(), true),
            ])
            .unwrap();

        let progress = service.progress(&goal.id, None).unwrap();
        assert_eq!(progress.entry_count, 1);
        assert_eq!(progress.adherence.map(|stats| stats.streak), Some(1));
        assert!(service.progress("missing", None).unwrap_err().is_not_found());
    }
}

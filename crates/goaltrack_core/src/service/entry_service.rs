//! Entry use-case service.
//!
//! # Responsibility
//! - Provide entry CRUD with goal-aware value checks.
//! - Back the home-card shortcuts that record today's value.
//!
//! # Invariants
//! - New and replaced entries must reference an existing goal and carry the
//!   value shape of that goal's type.
//! - Upserting today's entry keeps the existing entry's id and timestamp.

use crate::clock::Clock;
use crate::model::{Entry, EntryId, EntryValue, Goal, GoalId, GoalType};
use crate::progress::status::entry_on;
use crate::repo::{RecordRepository, RepoError};
use crate::store::CollectionStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for entry use-cases.
#[derive(Debug)]
pub enum EntryServiceError {
    GoalNotFound(GoalId),
    EntryNotFound(EntryId),
    /// Value shape does not fit the goal type, e.g. a number for adherence.
    ValueMismatch { goal_type: GoalType, value: EntryValue },
    Repo(RepoError),
}

impl Display for EntryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalNotFound(id) => write!(f, "goal not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::ValueMismatch { goal_type, value } => {
                write!(f, "value `{value}` does not fit a {goal_type} goal")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EntryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EntryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                collection: "entries",
                id,
            } => Self::EntryNotFound(id),
            RepoError::NotFound {
                collection: "goals",
                id,
            } => Self::GoalNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type EntryServiceResult<T> = Result<T, EntryServiceError>;

/// Entry service facade over goal and entry repositories.
pub struct EntryService<G, E, C> {
    goals: RecordRepository<G, Goal>,
    entries: RecordRepository<E, Entry>,
    clock: C,
}

impl<S, C> EntryService<S, S, C>
where
    S: CollectionStore<Goal> + CollectionStore<Entry> + Clone,
    C: Clock,
{
    pub fn from_store(store: &S, clock: C) -> Self {
        Self::new(
            RecordRepository::new(store.clone()),
            RecordRepository::new(store.clone()),
            clock,
        )
    }
}

impl<G, E, C> EntryService<G, E, C>
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
            clock,
        }
    }

    /// Lists entries in stored order, optionally only those of one goal.
    pub fn list_entries(&self, goal_id: Option<&str>) -> EntryServiceResult<Vec<Entry>> {
        let entries = self.entries.list()?;
        Ok(match goal_id {
            Some(goal_id) => entries
                .into_iter()
                .filter(|entry| entry.goal_id == goal_id)
                .collect(),
            None => entries,
        })
    }

    pub fn get_entry(&self, id: &str) -> EntryServiceResult<Entry> {
        Ok(self.entries.get(id)?)
    }

    pub fn create_entry(&self, entry: Entry) -> EntryServiceResult<Entry> {
        self.check_value(&entry)?;
        let entry = self.entries.create(entry)?;
        info!(
            "event=entry_create module=service status=ok entry_id={} goal_id={}",
            entry.id, entry.goal_id
        );
        Ok(entry)
    }

    pub fn update_entry(&self, id: &str, entry: Entry) -> EntryServiceResult<Entry> {
        self.check_value(&entry)?;
        let entry = self.entries.replace(id, entry)?;
        info!("event=entry_update module=service status=ok entry_id={}", entry.id);
        Ok(entry)
    }

    pub fn delete_entry(&self, id: &str) -> EntryServiceResult<()> {
        if !self.entries.delete(id)? {
            return Err(EntryServiceError::EntryNotFound(id.to_string()));
        }
        info!("event=entry_delete module=service status=ok entry_id={id}");
        Ok(())
    }

    /// Sets today's value for a goal, updating the first entry already
    /// dated today or creating one.
    pub fn record_today(
        &self,
        goal_id: &str,
        value: impl Into<EntryValue>,
    ) -> EntryServiceResult<Entry> {
        let value = value.into();
        let goal = self.goals.get(goal_id)?;
        if !value.fits(goal.kind) {
            return Err(EntryServiceError::ValueMismatch {
                goal_type: goal.kind,
                value,
            });
        }
        self.upsert_today(&goal, |_| value)
    }

    /// Flips today's adherence flag; a first tap records `true`.
    pub fn toggle_adherence_today(&self, goal_id: &str) -> EntryServiceResult<Entry> {
        let goal = self.goals.get(goal_id)?;
        if goal.kind != GoalType::Adherence {
            return Err(EntryServiceError::ValueMismatch {
                goal_type: goal.kind,
                value: EntryValue::Flag(true),
            });
        }
        self.upsert_today(&goal, |previous| {
            let done = previous.and_then(EntryValue::as_bool).unwrap_or(false);
            EntryValue::Flag(!done)
        })
    }

    fn upsert_today(
        &self,
        goal: &Goal,
        next_value: impl FnOnce(Option<EntryValue>) -> EntryValue,
    ) -> EntryServiceResult<Entry> {
        let today = self.clock.today();
        let now = self.clock.now();
        let entry = self.entries.modify(|entries| {
            let own: Vec<Entry> = entries
                .iter()
                .filter(|entry| entry.goal_id == goal.id)
                .cloned()
                .collect();
            let existing_id = entry_on(&own, today).map(|entry| entry.id.clone());

            match existing_id {
                Some(id) => {
                    let slot = entries
                        .iter_mut()
                        .find(|entry| entry.id == id)
                        .ok_or_else(|| RepoError::not_found::<Entry>(&id))?;
                    slot.value = next_value(Some(slot.value));
                    slot.validate()?;
                    Ok(slot.clone())
                }
                None => {
                    let entry = Entry::new(&goal.id, today, now, next_value(None));
                    entry.validate()?;
                    entries.push(entry.clone());
                    Ok(entry)
                }
            }
        })?;
        info!(
            "event=entry_record_today module=service status=ok goal_id={} entry_id={} date={}",
            goal.id, entry.id, today
        );
        Ok(entry)
    }

    fn check_value(&self, entry: &Entry) -> EntryServiceResult<()> {
        let goal = self.goals.get(&entry.goal_id)?;
        if !entry.value.fits(goal.kind) {
            return Err(EntryServiceError::ValueMismatch {
                goal_type: goal.kind,
                value: entry.value,
            });
        }
        Ok(())
    }
}

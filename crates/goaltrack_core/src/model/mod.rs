//! Domain model for goals, entries, todos and tags.
//!
//! # Responsibility
//! - Define the JSON record shapes every other layer consumes.
//! - Keep goal configuration a closed set of per-type variants.
//!
//! # Invariants
//! - Every record is identified by a stable string id.
//! - Updates replace whole records; there is no partial patch shape.
//! - Deleting a goal never touches its entries.

pub mod entry;
pub mod goal;
pub mod tag;
pub mod todo;
pub mod validation;

pub use entry::{Entry, EntryId, EntryValue};
pub use goal::{
    AdherenceConfig, Direction, DurationConfig, DurationTimeframe, DurationUnit, FrequencyConfig,
    FrequencyTimeframe, Goal, GoalConfig, GoalId, GoalType, Milestone, NumericConfig,
};
pub use tag::{normalize_tag_name, Tag, TagId};
pub use todo::{SubTask, Todo, TodoId};
pub use validation::ModelValidationError;

/// Generates a fresh record id.
///
/// Callers may supply their own ids (timestamps, client UUIDs); this is only
/// the fallback used when a record is created server-side.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

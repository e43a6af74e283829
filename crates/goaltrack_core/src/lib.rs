//! Core domain logic for goaltrack.
//! Owns the record model, the progress engine and JSON persistence; the
//! server and CLI crates are thin shells over it.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod progress;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::{Entry, EntryValue, Goal, GoalConfig, GoalType, Milestone, Tag, Todo};
pub use progress::{CalendarMonth, GoalChart, GoalProgress, GoalStatus, ProgressEngine};
pub use repo::{RecordRepository, RepoError, RepoResult};
pub use service::{EntryService, EntryServiceError, GoalService, TagService, TagServiceError, TodoService};
pub use store::{open_data_dir, CollectionStore, JsonFileStore, MemoryStore, Record, StoreError};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

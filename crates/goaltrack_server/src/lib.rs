//! JSON-over-HTTP shell around `goaltrack_core`.
//!
//! # Responsibility
//! - Map REST routes onto core services.
//! - Render core errors as `{"error": ...}` bodies with HTTP status codes.
//!
//! # Invariants
//! - Handlers hold no state of their own; every request builds services
//!   from the shared store and clock.
//! - File I/O runs on the blocking thread pool, never on the async runtime.

mod api;
pub mod config;
pub mod error;

use error::ApiError;
use goaltrack_core::service::{EntryService, GoalService, TagService, TodoService};
use goaltrack_core::{Clock, JsonFileStore, RecordRepository};
use std::sync::Arc;

pub use api::router;
pub use config::ServerConfig;

pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    store: JsonFileStore,
    clock: SharedClock,
}

impl AppState {
    pub fn new(store: JsonFileStore, clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            store,
            clock: Arc::new(clock),
        }
    }

    pub(crate) fn goals(&self) -> GoalService<JsonFileStore, JsonFileStore, SharedClock> {
        GoalService::from_store(&self.store, self.clock.clone())
    }

    pub(crate) fn entries(&self) -> EntryService<JsonFileStore, JsonFileStore, SharedClock> {
        EntryService::from_store(&self.store, self.clock.clone())
    }

    pub(crate) fn todos(&self) -> TodoService<JsonFileStore, SharedClock> {
        TodoService::new(RecordRepository::new(self.store.clone()), self.clock.clone())
    }

    pub(crate) fn tags(&self) -> TagService<JsonFileStore> {
        TagService::new(RecordRepository::new(self.store.clone()))
    }
}

/// Runs a storage-touching closure on the blocking pool.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await?
}

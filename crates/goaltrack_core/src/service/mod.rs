//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP and CLI layers decoupled from storage details.
//!
//! # Invariants
//! - Every successful mutation emits one `info` event.

pub mod entry_service;
pub mod goal_service;
pub mod tag_service;
pub mod todo_service;

pub use entry_service::{EntryService, EntryServiceError, EntryServiceResult};
pub use goal_service::GoalService;
pub use tag_service::{TagService, TagServiceError};
pub use todo_service::TodoService;

//! Collection storage for the four record kinds.
//!
//! # Responsibility
//! - Load and save whole collections of records.
//! - Keep file layout and serialization details behind one boundary.
//!
//! # Invariants
//! - A collection is always read and written as a whole.
//! - Read-modify-write cycles through [`CollectionStore::modify`] are
//!   serialized per store.
//! - A missing collection reads as empty; a malformed one is an error.

use crate::model::{Entry, Goal, ModelValidationError, Tag, Todo};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::{open_data_dir, JsonFileStore};
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// File parsed as JSON but lacks the `{ "<collection>": [...] }` shape.
    InvalidLayout {
        path: PathBuf,
        collection: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid json in `{}`: {source}", path.display())
            }
            Self::InvalidLayout { path, collection } => write!(
                f,
                "`{}` must contain an object with a `{collection}` array",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidLayout { .. } => None,
        }
    }
}

/// A persisted record kind with a stable string id.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Collection name; also the top-level key and file stem.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn validate(&self) -> Result<(), ModelValidationError>;
}

impl Record for Goal {
    const COLLECTION: &'static str = "goals";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        Self::validate(self)
    }
}

impl Record for Entry {
    const COLLECTION: &'static str = "entries";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        Self::validate(self)
    }
}

impl Record for Todo {
    const COLLECTION: &'static str = "todos";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        Self::validate(self)
    }
}

impl Record for Tag {
    const COLLECTION: &'static str = "tags";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelValidationError> {
        Self::validate(self)
    }
}

/// Whole-collection persistence for one record kind.
pub trait CollectionStore<T: Record> {
    fn load(&self) -> StoreResult<Vec<T>>;

    fn save(&self, records: &[T]) -> StoreResult<()>;

    /// Loads, applies `apply`, and saves when it succeeds.
    ///
    /// The default is not atomic against concurrent callers; stores shared
    /// across threads override it.
    fn modify<R, E>(&self, apply: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut records = self.load()?;
        let output = apply(&mut records)?;
        self.save(&records)?;
        Ok(output)
    }
}

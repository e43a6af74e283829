//! Generic CRUD repository over one record collection.
//!
//! # Responsibility
//! - Provide list/get/create/replace/delete over any [`Record`] kind.
//! - Translate missing or conflicting ids into semantic errors.
//!
//! # Invariants
//! - Write paths call `Record::validate()` before mutating the collection.
//! - Ids are unique within a collection.
//! - `replace` keeps the record's position in the collection.

use crate::model::ModelValidationError;
use crate::store::{CollectionStore, Record, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Store(StoreError),
    NotFound {
        collection: &'static str,
        id: String,
    },
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    /// Path id and body id of a replace disagree.
    IdMismatch { path_id: String, body_id: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{} not found: {id}", singular(collection)),
            Self::DuplicateId { collection, id } => {
                write!(f, "{} already exists: {id}", singular(collection))
            }
            Self::IdMismatch { path_id, body_id } => {
                write!(f, "body id `{body_id}` does not match path id `{path_id}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound { .. } | Self::DuplicateId { .. } | Self::IdMismatch { .. } => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl RepoError {
    pub fn not_found<T: Record>(id: &str) -> Self {
        Self::NotFound {
            collection: T::COLLECTION,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn singular(collection: &str) -> &str {
    match collection {
        "entries" => "entry",
        other => other.strip_suffix('s').unwrap_or(other),
    }
}

/// CRUD facade over a collection store.
#[derive(Debug, Clone)]
pub struct RecordRepository<S, T> {
    store: S,
    _record: PhantomData<fn() -> T>,
}

impl<S, T> RecordRepository<S, T>
where
    S: CollectionStore<T>,
    T: Record,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// All records in stored order.
    pub fn list(&self) -> RepoResult<Vec<T>> {
        Ok(self.store.load()?)
    }

    pub fn find(&self, id: &str) -> RepoResult<Option<T>> {
        Ok(self.list()?.into_iter().find(|record| record.id() == id))
    }

    pub fn get(&self, id: &str) -> RepoResult<T> {
        self.find(id)?.ok_or_else(|| RepoError::not_found::<T>(id))
    }

    /// Appends a new record; its id must not exist yet.
    pub fn create(&self, record: T) -> RepoResult<T> {
        self.create_with(record, |_, _| Ok(()))
    }

    /// Like [`Self::create`], but `prepare` first sees the current collection
    /// and may adjust or reject the record. Runs under the store's write lock.
    pub fn create_with<E>(
        &self,
        mut record: T,
        prepare: impl FnOnce(&[T], &mut T) -> Result<(), E>,
    ) -> Result<T, E>
    where
        E: From<RepoError> + From<StoreError>,
    {
        self.store.modify(|records: &mut Vec<T>| {
            prepare(records.as_slice(), &mut record)?;
            record.validate().map_err(RepoError::from)?;
            if records.iter().any(|existing| existing.id() == record.id()) {
                return Err(RepoError::DuplicateId {
                    collection: T::COLLECTION,
                    id: record.id().to_string(),
                }
                .into());
            }
            records.push(record.clone());
            Ok(record)
        })
    }

    /// Replaces the record stored under `id` with `record` in place.
    pub fn replace(&self, id: &str, record: T) -> RepoResult<T> {
        self.replace_with(id, record, |_, _, _| Ok(()))
    }

    /// Like [`Self::replace`], but `prepare` receives the stored record and the
    /// whole collection first. Runs under the store's write lock, after the
    /// id is known to exist.
    pub fn replace_with<E>(
        &self,
        id: &str,
        mut record: T,
        prepare: impl FnOnce(&T, &[T], &mut T) -> Result<(), E>,
    ) -> Result<T, E>
    where
        E: From<RepoError> + From<StoreError>,
    {
        if record.id() != id {
            return Err(RepoError::IdMismatch {
                path_id: id.to_string(),
                body_id: record.id().to_string(),
            }
            .into());
        }
        self.store.modify(|records: &mut Vec<T>| {
            let index = records
                .iter()
                .position(|existing| existing.id() == id)
                .ok_or_else(|| RepoError::not_found::<T>(id))?;
            prepare(&records[index], records.as_slice(), &mut record)?;
            record.validate().map_err(RepoError::from)?;
            records[index] = record.clone();
            Ok(record)
        })
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> RepoResult<bool> {
        self.store.modify(|records: &mut Vec<T>| {
            let before = records.len();
            records.retain(|record| record.id() != id);
            Ok(records.len() != before)
        })
    }

    /// Runs a whole-collection mutation under the store's write lock.
    pub fn modify<R>(
        &self,
        apply: impl FnOnce(&mut Vec<T>) -> RepoResult<R>,
    ) -> RepoResult<R> {
        self.store.modify(apply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;
    use crate::store::MemoryStore;

    fn repo() -> RecordRepository<MemoryStore<Tag>, Tag> {
        RecordRepository::new(MemoryStore::default())
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let repo = repo();
        let tag = Tag::new("work", "#3b82f6");
        repo.create(tag.clone()).unwrap();
        let err = repo.create(tag).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateId { collection: "tags", .. }));
    }

    #[test]
    fn replace_requires_matching_existing_id() {
        let repo = repo();
        let tag = Tag::new("work", "#3b82f6");

        let missing = repo.replace(&tag.id, tag.clone()).unwrap_err();
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), format!("tag not found: {}", tag.id));

        repo.create(tag.clone()).unwrap();
        let mismatch = repo.replace("other", tag.clone()).unwrap_err();
        assert!(matches!(mismatch, RepoError::IdMismatch { .. }));

        let mut renamed = tag.clone();
        renamed.name = "office".to_string();
        repo.replace(&tag.id, renamed).unwrap();
        assert_eq!(repo.get(&tag.id).unwrap().name, "office");
    }

    #[test]
    fn prepare_hooks_see_the_collection_and_can_reject() {
        let repo = repo();
        repo.create(Tag::new("home", "#22c55e")).unwrap();

        let created = repo
            .create_with(Tag::new("work", ""), |tags, tag| {
                tag.color = if tags.len() == 1 { "#3b82f6" } else { "#000000" }.to_string();
                Ok::<(), RepoError>(())
            })
            .unwrap();
        assert_eq!(created.color, "#3b82f6");

        let unknown = Tag::new("gym", "");
        let mut called = false;
        let err = repo
            .replace_with(&unknown.id, unknown.clone(), |_, _, _| {
                called = true;
                Ok::<(), RepoError>(())
            })
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!called);
    }

    #[test]
    fn invalid_records_never_reach_the_store() {
        let repo = repo();
        let err = repo.create(Tag::new("work", "blue")).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn delete_reports_whether_a_record_was_removed() {
        let repo = repo();
        let tag = repo.create(Tag::new("home", "#22c55e")).unwrap();
        assert!(repo.delete(&tag.id).unwrap());
        assert!(!repo.delete(&tag.id).unwrap());
    }
}

//! One pretty-printed JSON file per collection under a data directory.
//!
//! # Invariants
//! - File `<dir>/<collection>.json` holds `{ "<collection>": [...] }`.
//! - Writes go to a sibling temp file first and are renamed into place.
//! - Missing files are created empty on first read.
//! - Every file write, bootstrap included, happens under the write lock.

use super::{CollectionStore, Record, StoreError, StoreResult};
use crate::model::{Entry, Goal, Tag, Todo};
use log::{debug, error, info};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// JSON-file store rooted at one data directory.
///
/// Clones share the write lock, so every clone serializes `modify` calls.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

/// Opens (and creates when missing) the data directory with all four
/// collection files.
///
/// # Side effects
/// - Creates `dir` and empty collection files that do not exist yet.
/// - Emits `store_open` logging events with duration and status.
pub fn open_data_dir(dir: impl AsRef<Path>) -> StoreResult<JsonFileStore> {
    let started_at = Instant::now();
    let store = JsonFileStore::new(dir.as_ref());
    info!(
        "event=store_open module=store status=start dir={}",
        store.dir.display()
    );

    let result = {
        let _guard = store.lock();
        store
            .ensure_collection::<Goal>()
            .and_then(|()| store.ensure_collection::<Entry>())
            .and_then(|()| store.ensure_collection::<Todo>())
            .and_then(|()| store.ensure_collection::<Tag>())
    };

    match result {
        Ok(()) => {
            info!(
                "event=store_open module=store status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=store_open module=store status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn collection_path<T: Record>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", T::COLLECTION))
    }

    fn ensure_dir(&self) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Creates the directory and an empty collection file when missing.
    /// Callers hold the write lock.
    fn ensure_collection<T: Record>(&self) -> StoreResult<()> {
        if self.collection_path::<T>().exists() {
            return Ok(());
        }
        self.ensure_dir()?;
        self.write_collection::<T>(&[])
    }

    /// Callers hold the write lock or have checked that the file exists.
    fn read_collection<T: Record>(&self) -> StoreResult<Vec<T>> {
        let path = self.collection_path::<T>();

        let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let mut document: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let items = document
            .get_mut(T::COLLECTION)
            .filter(|value| value.is_array())
            .map(Value::take)
            .ok_or_else(|| StoreError::InvalidLayout {
                path: path.clone(),
                collection: T::COLLECTION,
            })?;
        let records: Vec<T> =
            serde_json::from_value(items).map_err(|source| StoreError::Json { path, source })?;
        debug!(
            "event=collection_read module=store status=ok collection={} count={}",
            T::COLLECTION,
            records.len()
        );
        Ok(records)
    }

    fn write_collection<T: Record>(&self, records: &[T]) -> StoreResult<()> {
        let path = self.collection_path::<T>();
        let items = serde_json::to_value(records).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let mut document = Map::new();
        document.insert(T::COLLECTION.to_string(), items);
        let text = serde_json::to_string_pretty(&Value::Object(document)).map_err(|source| {
            StoreError::Json {
                path: path.clone(),
                source,
            }
        })?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, text).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(
            "event=collection_write module=store status=ok collection={} count={}",
            T::COLLECTION,
            records.len()
        );
        Ok(())
    }
}

impl<T: Record> CollectionStore<T> for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<T>> {
        if !self.collection_path::<T>().exists() {
            let _guard = self.lock();
            self.ensure_collection::<T>()?;
        }
        self.read_collection()
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let _guard = self.lock();
        self.ensure_dir()?;
        self.write_collection(records)
    }

    fn modify<R, E>(&self, apply: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let _guard = self.lock();
        self.ensure_collection::<T>()?;
        let mut records = self.read_collection()?;
        let output = apply(&mut records)?;
        self.write_collection(&records)?;
        Ok(output)
    }
}

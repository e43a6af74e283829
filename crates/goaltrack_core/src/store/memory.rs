//! In-process store used by tests and tooling.

use super::{CollectionStore, Record, StoreError, StoreResult};
use std::sync::{Arc, Mutex};

/// Keeps one collection in memory. Clones share the same records.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    records: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl<T: Record> CollectionStore<T> for MemoryStore<T> {
    fn load(&self) -> StoreResult<Vec<T>> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(records.clone())
    }

    fn save(&self, records: &[T]) -> StoreResult<()> {
        let mut stored = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *stored = records.to_vec();
        Ok(())
    }

    fn modify<R, E>(&self, apply: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut stored = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut working = stored.clone();
        let output = apply(&mut working)?;
        *stored = working;
        Ok(output)
    }
}

//! In-memory store for tests and ephemeral hosts.

use super::{RecordStore, StoreError};
use crate::models::{ContextKey, ScoreRecord};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// [`RecordStore`] held in a `Mutex<BTreeMap>`.
///
/// Counts successful writes and can be told to fail them, which lets tests
/// check that rejected commands never write and failed writes never commit.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<ContextKey, ScoreRecord>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save`/`delete` calls that changed the mapping.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following write fail with [`StoreError::Unavailable`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored record.
    pub fn records(&self) -> BTreeMap<ContextKey, ScoreRecord> {
        self.guard().clone()
    }

    fn guard(&self) -> MutexGuard<'_, BTreeMap<ContextKey, ScoreRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn lookup(&self, key: &ContextKey) -> Result<Option<ScoreRecord>, StoreError> {
        Ok(self.guard().get(key).cloned())
    }

    fn save(&self, key: &ContextKey, record: &ScoreRecord) -> Result<(), StoreError> {
        self.check_writable()?;
        self.guard().insert(*key, record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete(&self, key: &ContextKey) -> Result<bool, StoreError> {
        self.check_writable()?;
        let removed = self.guard().remove(key).is_some();
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

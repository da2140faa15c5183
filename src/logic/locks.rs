//! Per-context mutual exclusion for read-modify-write cycles.

use crate::models::ContextKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Lazily created lock per [`ContextKey`].
///
/// Commands on the same key queue behind each other; different keys only
/// share the brief map lookup.
#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<ContextKey, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for `key`. Repeated calls return the same `Arc`.
    pub fn get(&self, key: &ContextKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(*key).or_default().clone()
    }

    /// Drop the entry for `key` if nobody else holds it.
    ///
    /// Clones are only handed out under the map lock, so a count of one means
    /// no caller can be waiting on this mutex.
    pub fn forget_idle(&self, key: &ContextKey) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

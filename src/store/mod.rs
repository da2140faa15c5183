//! Record storage: ContextKey → ScoreRecord.
//!
//! Stores are the single source of truth; callers read, mutate one entry and
//! write it back on every command instead of caching records.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{ContextKey, ScoreRecord};
use std::fmt;
use std::path::PathBuf;

/// Errors from reading or writing a store.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure on `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Record could not be encoded.
    Serialize(serde_json::Error),
    /// Injected or backend-specific failure.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            StoreError::Serialize(e) => write!(f, "serialize error: {}", e),
            StoreError::Unavailable(msg) => write!(f, "store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Serialize(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err)
    }
}

/// Durable mapping from context to scoreboard.
///
/// Each call is atomic on its own: a reader never sees a half-written
/// mapping, and `save`/`delete` on different keys never lose each other's
/// writes. Serializing read-modify-write on the *same* key is the caller's
/// job (see `logic::KeyLocks`).
pub trait RecordStore: Send + Sync {
    /// Record for `key`, if one exists.
    fn lookup(&self, key: &ContextKey) -> Result<Option<ScoreRecord>, StoreError>;

    /// Insert or replace the record for `key`.
    fn save(&self, key: &ContextKey, record: &ScoreRecord) -> Result<(), StoreError>;

    /// Remove the record for `key`. Returns whether one existed.
    fn delete(&self, key: &ContextKey) -> Result<bool, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn lookup(&self, key: &ContextKey) -> Result<Option<ScoreRecord>, StoreError> {
        (**self).lookup(key)
    }

    fn save(&self, key: &ContextKey, record: &ScoreRecord) -> Result<(), StoreError> {
        (**self).save(key, record)
    }

    fn delete(&self, key: &ContextKey) -> Result<bool, StoreError> {
        (**self).delete(key)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn lookup(&self, key: &ContextKey) -> Result<Option<ScoreRecord>, StoreError> {
        (**self).lookup(key)
    }

    fn save(&self, key: &ContextKey, record: &ScoreRecord) -> Result<(), StoreError> {
        (**self).save(key, record)
    }

    fn delete(&self, key: &ContextKey) -> Result<bool, StoreError> {
        (**self).delete(key)
    }
}

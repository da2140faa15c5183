//! JSON file store: the whole mapping lives in one pretty-printed file.

use super::{RecordStore, StoreError};
use crate::models::{ContextKey, ScoreRecord};
use serde_json::Value;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

type Mapping = BTreeMap<String, Value>;

/// File-backed [`RecordStore`].
///
/// Every write reads the full mapping, changes one entry and replaces the
/// file through a `<path>.tmp` sibling and a rename, so a crash mid-write
/// leaves the previous file intact. Entries are kept as raw JSON, which means
/// an entry this version cannot decode is still written back unchanged.
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes whole-file rewrites across keys.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Missing or unparsable file reads as an empty mapping.
    fn read_all(&self) -> Result<Mapping, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Mapping::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        match serde_json::from_str(&text) {
            Ok(mapping) => Ok(mapping),
            Err(e) => {
                log::warn!(
                    "{}: unreadable scoreboard file, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(Mapping::new())
            }
        }
    }

    fn write_all(&self, mapping: &Mapping) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let json = serde_json::to_string_pretty(mapping)?;
        let tmp = self.tmp_path();
        let io = |source| StoreError::Io {
            path: tmp.clone(),
            source,
        };
        let mut file = std::fs::File::create(&tmp).map_err(io)?;
        file.write_all(json.as_bytes()).map_err(io)?;
        file.sync_all().map_err(io)?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn lookup(&self, key: &ContextKey) -> Result<Option<ScoreRecord>, StoreError> {
        let mut mapping = self.read_all()?;
        let Some(raw) = mapping.remove(&key.to_string()) else {
            return Ok(None);
        };
        match serde_json::from_value(raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                log::warn!("{}: undecodable scoreboard entry, ignoring: {}", key, e);
                Ok(None)
            }
        }
    }

    fn save(&self, key: &ContextKey, record: &ScoreRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut mapping = self.read_all()?;
        mapping.insert(key.to_string(), serde_json::to_value(record)?);
        self.write_all(&mapping)
    }

    fn delete(&self, key: &ContextKey) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut mapping = self.read_all()?;
        if mapping.remove(&key.to_string()).is_none() {
            return Ok(false);
        }
        self.write_all(&mapping)?;
        Ok(true)
    }
}

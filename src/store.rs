//! Persistent key-value store backed by a single JSON file.
//!
//! Values are JSON documents addressed by string keys. Reads never fail: a missing key,
//! an unreadable file, or a value of the wrong shape all yield the caller's fallback.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{NoorError, Result};

/// Keys used by the application.
pub mod keys {
    /// Last committed coordinates.
    pub const COORDS: &str = "coords";
    /// Selected surah number.
    pub const SURAH: &str = "surah";
    /// Selected hadith book id.
    pub const HADITH_BOOK: &str = "hadithBook";
    /// Theme preference (`dark` or `light`).
    pub const THEME: &str = "theme";
}

/// What: String-keyed JSON store persisted to disk on every write.
///
/// Details:
/// - With no backing path (tests, headless runs) the store is memory-only.
#[derive(Debug, Default)]
pub struct KeyValueStore {
    /// Backing file, if any.
    path: Option<PathBuf>,
    /// Current entries.
    entries: BTreeMap<String, Value>,
}

impl KeyValueStore {
    /// What: Open the store at `path`, loading existing entries.
    ///
    /// Inputs:
    /// - `path`: JSON file location; need not exist yet.
    ///
    /// Output:
    /// - Store with the file's entries, or empty when the file is missing or corrupt.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<BTreeMap<String, Value>>(&s) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "[Store] Ignoring corrupt store file"
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "[Store] Opened");
        Self {
            path: Some(path),
            entries,
        }
    }

    /// Memory-only store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Backing file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// What: Read and decode the value stored under `key`.
    ///
    /// Output:
    /// - `Some(value)` when present and decodable as `T`; `None` otherwise.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.entries.get(key)?;
        match serde_json::from_value(raw.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(key, error = %e, "[Store] Stored value has unexpected shape");
                None
            }
        }
    }

    /// Read `key`, falling back to `fallback` when absent or undecodable.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.load(key).unwrap_or(fallback)
    }

    /// What: Store `value` under `key` and write the file through.
    ///
    /// Output:
    /// - `Ok(())` once written (or immediately for memory-only stores).
    ///
    /// # Errors
    /// - `NoorError::Storage` when the value cannot be encoded or the file cannot be written.
    ///   The in-memory entry is updated regardless.
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let v = serde_json::to_value(value).map_err(|e| NoorError::Storage(e.to_string()))?;
        self.entries.insert(key.to_string(), v);
        self.flush()
    }

    /// Write all entries to the backing file.
    fn flush(&self) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        let s = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| NoorError::Storage(e.to_string()))?;
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, &s) {
            Ok(()) => {
                tracing::trace!(path = %path.display(), bytes = s.len(), "[Store] Persisted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "[Store] Failed to write");
                Err(NoorError::Storage(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, keys};

    #[test]
    /// What: Values of the wrong shape fall back instead of erroring.
    ///
    /// Inputs:
    /// - A string saved under the surah key, read back as a number.
    ///
    /// Output:
    /// - `load` yields `None`; `load_or` yields the fallback.
    fn wrong_shape_yields_fallback() {
        let mut store = KeyValueStore::in_memory();
        store
            .save(keys::SURAH, &"not-a-number")
            .expect("memory store never fails");
        assert_eq!(store.load::<u32>(keys::SURAH), None);
        assert_eq!(store.load_or(keys::SURAH, 1_u32), 1);
        assert_eq!(store.load_or(keys::THEME, "dark".to_string()), "dark");
    }
}

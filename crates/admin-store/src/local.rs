//! Local store — a directory of JSON documents addressed by string keys.
//!
//! Each key maps to `<dir>/<key>.json`. Record collections live under the
//! keys returned by [`key_for`] (`legacy-admin-brokers`, …) and are stored as
//! a JSON array of objects. Writes go to a temporary sibling first and are
//! renamed into place so a concurrent reader never sees a torn document.

use crate::error::StoreError;
use admin_core::{EntityKind, Record};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Store key of an entity's record collection.
pub fn key_for(kind: EntityKind) -> String {
    format!("legacy-admin-{kind}")
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (and create if necessary) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        tracing::debug!(dir = %dir.display(), "store: opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// The raw document text for `key`, or `None` if it has never been set.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let Some(text) = self.get_raw(key)? else {
            return Ok(None);
        };
        let path = self.path_for(key)?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::json(path, e))
    }

    pub fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let text = serde_json::to_string(value).map_err(|e| StoreError::json(&path, e))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, text).map_err(|e| StoreError::io(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!(key, "store: set");
        Ok(())
    }

    /// Delete `key`. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key, "store: removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Load an entity's collection. A key that was never written loads as an
    /// empty collection.
    pub fn load_records(&self, kind: EntityKind) -> Result<Vec<Record>, StoreError> {
        let key = key_for(kind);
        match self.get(&key)? {
            None => Ok(Vec::new()),
            Some(value) => records_from_array(value, &key),
        }
    }

    pub fn save_records(&self, kind: EntityKind, records: &[Record]) -> Result<(), StoreError> {
        let value = Value::Array(records.iter().cloned().map(Record::into_value).collect());
        self.set(&key_for(kind), &value)
    }
}

/// Turn a stored JSON array into records, rejecting any other shape.
pub(crate) fn records_from_array(value: Value, context: &str) -> Result<Vec<Record>, StoreError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| Record::try_from(item).map_err(StoreError::from))
            .collect(),
        other => Err(StoreError::UnexpectedShape(format!(
            "{context}: expected an array of records, found {}",
            match other {
                Value::Object(_) => "an object",
                Value::String(_) => "a string",
                Value::Number(_) => "a number",
                Value::Bool(_) => "a boolean",
                _ => "null",
            }
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Persistence of the selected theme mode.
//!
//! The registry does not own a persistence engine. It talks to a
//! [`ModeStorage`] collaborator through two calls: `get` once at startup to
//! seed the mode, and `set` on every mode change. Values are JSON-encoded
//! mode names (`"\"dark\""`), stored under [`DEFAULT_STORAGE_KEY`].
//!
//! Three implementations ship with the crate:
//!
//! - [`MemoryStorage`]: a process-local map, handy for tests.
//! - [`JsonFileStorage`]: a small JSON object on disk.
//! - [`NoStorage`]: forgets everything.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::error::StorageError;

/// Key under which the theme mode is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "themeMode";

/// Key-value persistence used for the theme mode.
///
/// Implementations must tolerate missing keys by returning `None`.
pub trait ModeStorage {
    /// Returns the raw stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: ModeStorage + ?Sized> ModeStorage for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: ModeStorage + ?Sized> ModeStorage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl ModeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage that never remembers anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStorage;

impl ModeStorage for NoStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Storage backed by a JSON object file.
///
/// The file holds one object; each key maps to the decoded JSON value, so a
/// stored dark mode reads `{"themeMode": "dark"}`. A missing file behaves
/// like an empty one. A file that cannot be read or is not a JSON object is
/// never overwritten: reads log and return `None`, writes fail. Parent
/// directories are created on write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(self.corrupt("expected a JSON object")),
            Err(err) => Err(self.corrupt(&err.to_string())),
        }
    }

    fn corrupt(&self, message: &str) -> StorageError {
        StorageError::Corrupt {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }
}

impl ModeStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(map) => map.get(key).map(Value::to_string),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable theme storage file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.load()?;
        let decoded =
            serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.into()));
        map.insert(key.to_string(), decoded);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(DEFAULT_STORAGE_KEY), None);
        storage.set(DEFAULT_STORAGE_KEY, "\"dark\"").unwrap();
        assert_eq!(
            storage.get(DEFAULT_STORAGE_KEY).as_deref(),
            Some("\"dark\"")
        );
    }

    #[test]
    fn test_no_storage_forgets() {
        NoStorage.set(DEFAULT_STORAGE_KEY, "\"dark\"").unwrap();
        assert_eq!(NoStorage.get(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_json_file_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.get(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_json_file_storage_writes_decoded_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let storage = JsonFileStorage::new(&path);

        storage.set(DEFAULT_STORAGE_KEY, "\"dark\"").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[DEFAULT_STORAGE_KEY], Value::String("dark".into()));
        assert_eq!(
            storage.get(DEFAULT_STORAGE_KEY).as_deref(),
            Some("\"dark\"")
        );
    }

    #[test]
    fn test_json_file_storage_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"fontSize": 14}"#).unwrap();

        let storage = JsonFileStorage::new(&path);
        storage.set(DEFAULT_STORAGE_KEY, "\"light\"").unwrap();

        assert_eq!(storage.get("fontSize").as_deref(), Some("14"));
        assert_eq!(
            storage.get(DEFAULT_STORAGE_KEY).as_deref(),
            Some("\"light\"")
        );
    }

    #[test]
    fn test_json_file_storage_ignores_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert_eq!(storage.get(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_json_file_storage_keeps_truncated_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"fontSize": 14, "#).unwrap();

        let storage = JsonFileStorage::new(&path);
        let err = storage.set(DEFAULT_STORAGE_KEY, "\"dark\"").unwrap_err();

        assert!(matches!(err, StorageError::Corrupt { .. }));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"fontSize": 14, "#
        );
    }

    #[test]
    fn test_json_file_storage_refuses_to_overwrite_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(matches!(
            storage.set(DEFAULT_STORAGE_KEY, "\"light\""),
            Err(StorageError::Corrupt { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_json_file_storage_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory in place of the file fails to read with something
        // other than NotFound.
        let storage = JsonFileStorage::new(dir.path());

        assert_eq!(storage.get(DEFAULT_STORAGE_KEY), None);
        assert!(matches!(
            storage.set(DEFAULT_STORAGE_KEY, "\"dark\""),
            Err(StorageError::Read { .. })
        ));
    }
}

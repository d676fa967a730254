//! Persisted user preferences.
//!
//! The record lives under a single key of a [`KeyValueStorage`]. Loading a
//! missing key yields `None`; a record that fails to decode is reported as
//! [`SettingsError::Corrupt`] and left for the caller to handle.

use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};
use shared::domain::ConnectionId;

use crate::error::{SettingsError, StorageError};

pub const SETTINGS_STORAGE_KEY: &str = "region_browser.settings";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub selected_connection: Option<ConnectionId>,
    pub preferred_language: Option<String>,
    pub show_bigger_regions: bool,
}

/// Minimal string store, shaped after the key/value storage GUI shells hand
/// to applications.
pub trait KeyValueStorage: Send {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_string(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// JSON object of key -> string kept in one file. Writes go through a
/// sibling temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(self.io_error(err)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Json {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let serialized = serde_json::to_string_pretty(values).map_err(|source| StorageError::Json {
            path: self.path.display().to_string(),
            source,
        })?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serialized).map_err(|err| self.io_error(err))?;
        fs::rename(&tmp_path, &self.path).map_err(|err| self.io_error(err))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_string(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StorageError::Json { .. }) => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        values.insert(key.to_owned(), value);
        self.write_all(&values)
    }
}

pub struct SettingsStore {
    storage: Box<dyn KeyValueStorage>,
}

impl SettingsStore {
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    pub fn load(&self) -> Result<Option<Settings>, SettingsError> {
        let Some(raw) = self.storage.get_string(SETTINGS_STORAGE_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(SettingsError::Corrupt)
    }

    pub fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let serialized = serde_json::to_string(settings).map_err(SettingsError::Encode)?;
        self.storage
            .set_string(SETTINGS_STORAGE_KEY, serialized)
            .map_err(SettingsError::from)
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{DailyUpdate, Task, UserProfile};

const TASKS_ENTRY: &str = "tasks.json";
const UPDATES_ENTRY: &str = "daily_updates.json";
const USER_ENTRY: &str = "user.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create data directory: {0}")]
    DirectoryError(String),
    #[error("Failed to serialize {entry}: {message}")]
    SerializeError { entry: &'static str, message: String },
    #[error("Failed to write {entry}: {message}")]
    WriteError { entry: &'static str, message: String },
}

/// Durable snapshot storage for the stores.
///
/// Each collection lives in its own JSON entry under the data directory and
/// is rewritten whole on every save. A missing or unparseable entry loads as
/// "no durable data".
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open snapshot storage rooted at the given directory, creating it if needed
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| StorageError::DirectoryError(e.to_string()))?;
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Load the tasks entry; missing or corrupt data yields an empty collection
    pub fn load_tasks(&self) -> Vec<Task> {
        self.read_entry(TASKS_ENTRY).unwrap_or_default()
    }

    /// Overwrite the tasks entry with the full collection
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.write_entry(TASKS_ENTRY, &tasks)
    }

    /// Load the daily-updates entry; missing or corrupt data yields an empty collection
    pub fn load_updates(&self) -> Vec<DailyUpdate> {
        self.read_entry(UPDATES_ENTRY).unwrap_or_default()
    }

    /// Overwrite the daily-updates entry with the full collection
    pub fn save_updates(&self, updates: &[DailyUpdate]) -> Result<(), StorageError> {
        self.write_entry(UPDATES_ENTRY, &updates)
    }

    /// Load the signed-in user entry, if any
    pub fn load_user(&self) -> Option<UserProfile> {
        self.read_entry(USER_ENTRY)
    }

    /// Overwrite the signed-in user entry
    pub fn save_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        self.write_entry(USER_ENTRY, user)
    }

    /// Remove the signed-in user entry (logout)
    pub fn clear_user(&self) -> Result<(), StorageError> {
        let path = self.dir.join(USER_ENTRY);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::WriteError {
                entry: USER_ENTRY,
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    fn read_entry<T: DeserializeOwned>(&self, entry: &'static str) -> Option<T> {
        let path = self.dir.join(entry);
        if !path.exists() {
            return None;
        }
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("could not read {}: {}; treating as empty", entry, e);
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                // A corrupt snapshot is treated as "no durable data found"
                log::warn!("could not parse {}: {}; starting from empty state", entry, e);
                None
            }
        }
    }

    fn write_entry<T: Serialize>(&self, entry: &'static str, value: &T) -> Result<(), StorageError> {
        let json =
            serde_json::to_string_pretty(value).map_err(|e| StorageError::SerializeError {
                entry,
                message: e.to_string(),
            })?;
        fs::write(self.dir.join(entry), json).map_err(|e| StorageError::WriteError {
            entry,
            message: e.to_string(),
        })
    }
}

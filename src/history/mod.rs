// src/history/mod.rs
use std::io;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{HistoryRecord, StrengthTier};

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Namespace key the history blob is stored under.
pub const STORAGE_KEY: &str = "password_history";
pub const MAX_HISTORY: usize = 20;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Could not determine data directory")]
    NoDataDirectory,

    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Newest-first history of generated secrets, capped at [`MAX_HISTORY`].
///
/// The plain methods never fail: storage problems are logged and degrade to
/// an empty list or a dropped write. The `try_` methods return the error.
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn try_list(&self) -> Result<Vec<HistoryRecord>> {
        match self.store.get(STORAGE_KEY)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn list(&self) -> Vec<HistoryRecord> {
        self.try_list().unwrap_or_else(|e| {
            log::warn!("Error reading history: {}", e);
            Vec::new()
        })
    }

    fn write(&self, records: &[HistoryRecord]) -> Result<()> {
        let data = serde_json::to_string(records)?;
        self.store.set(STORAGE_KEY, &data)
    }

    pub fn try_save(&self, password: &str, strength: StrengthTier, length: usize) -> Result<HistoryRecord> {
        let record = HistoryRecord {
            id: Uuid::new_v4().to_string(),
            password: password.to_string(),
            created_at: Utc::now(),
            strength,
            length,
        };

        // A corrupt blob is replaced rather than blocking new entries
        let mut records = self.list();
        records.insert(0, record.clone());
        records.truncate(MAX_HISTORY);

        self.write(&records)?;
        log::debug!("Saved history record {} ({} stored)", record.id, records.len());
        Ok(record)
    }

    pub fn save(&self, password: &str, strength: StrengthTier, length: usize) {
        if let Err(e) = self.try_save(password, strength, length) {
            log::warn!("Error saving to history: {}", e);
        }
    }

    pub fn try_delete_one(&self, id: &str) -> Result<()> {
        let mut records = self.try_list()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            log::debug!("History record {} not found, nothing to delete", id);
            return Ok(());
        }
        self.write(&records)
    }

    pub fn delete_one(&self, id: &str) {
        if let Err(e) = self.try_delete_one(id) {
            log::warn!("Error deleting from history: {}", e);
        }
    }

    pub fn try_clear_all(&self) -> Result<()> {
        self.store.remove(STORAGE_KEY)
    }

    pub fn clear_all(&self) {
        if let Err(e) = self.try_clear_all() {
            log::warn!("Error clearing history: {}", e);
        }
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Failures of the underlying key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage exists in this environment.
    #[error("storage is unavailable")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A string key-value store, the shape of a browser's local storage.
///
/// The trip store keeps its whole list under one key, so adapters only need
/// whole-value reads and writes.
pub trait SlotStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage, lost on exit. Used by tests and the `memory` backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().expect("storage lock poisoned");
        Ok(slots.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().expect("storage lock poisoned");
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().expect("storage lock poisoned");
        slots.remove(key);
        Ok(())
    }
}

/// Storage for environments that have none. Every call fails with
/// [`StorageError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl SlotStorage for UnavailableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

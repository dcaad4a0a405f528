//! In-memory storage implementation for testing.

use crate::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing.
///
/// Values are kept as serialized JSON so reads go through the same
/// deserialization path as the file backend.
#[derive(Debug)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new in-memory storage.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Seed a key with raw JSON text, bypassing serialization.
    pub fn insert_raw(&self, key: &str, json: impl Into<String>) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        data.insert(key.to_string(), json.into());
        Ok(())
    }

    /// Raw JSON text stored under a key.
    pub fn raw(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(data.get(key).cloned())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.raw(key)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::json(key, e)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::json(key, e))?;
        self.insert_raw(key, json)
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        data.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(data.contains_key(key))
    }
}

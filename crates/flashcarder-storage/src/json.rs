//! JSON file-based storage implementation.
//!
//! Each key is one pretty-printed JSON file directly under the base
//! directory: `studySessions` lives in `<base>/studySessions.json`.

use crate::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Storage over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    base_path: PathBuf,
}

impl JsonStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the JSON files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File backing a key.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        // One flat directory: no separators, no dot segments.
        let flat = !key.is_empty() && !key.contains(['/', '\\']) && key != "." && key != "..";
        if !flat {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> StorageResult<Option<T>> {
        let path = self.key_to_path(key)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "Key not stored yet");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::io(path, e)),
        };
        debug!(key, bytes = content.len(), "Read key");
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::json(key, e))
    }

    async fn write<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let content = serde_json::to_string_pretty(value).map_err(|e| StorageError::json(key, e))?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::io(&self.base_path, e))?;

        // Readers see the old file or the new one, never half of one.
        let staging = self.base_path.join(format!(".{key}.json.tmp"));
        fs::write(&staging, &content)
            .await
            .map_err(|e| StorageError::io(&staging, e))?;
        fs::rename(&staging, &path)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        debug!(key, bytes = content.len(), "Wrote key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Removed key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::io(path, e))
    }
}

/// Create a storage instance at the default data directory.
pub fn default_storage() -> Option<JsonStorage> {
    flashcarder_util::path::data_dir().map(|p| JsonStorage::new(p.join("data")))
}

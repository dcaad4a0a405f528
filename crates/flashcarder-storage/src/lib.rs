//! Storage layer for flashcarder.
//!
//! This crate provides the key-value persistence the application is built
//! on, with two backends:
//! - JSON file storage (default), one file per key
//! - In-memory storage (for testing)
//!
//! The application uses three keys, see [`keys`].

pub mod error;
pub mod json;
pub mod memory;

pub use error::{StorageError, StorageResult};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

/// Well-known storage keys.
pub mod keys {
    /// Ordered sequence of decks.
    pub const DECKS: &str = "flashcards_data";
    /// Map of deck id to study session.
    pub const STUDY_SESSIONS: &str = "studySessions";
    /// Ordered sequence of language categories.
    pub const LANGUAGES: &str = "languages";
}

/// A trait for key-value storage backends.
///
/// Values are serialized/deserialized as JSON.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a value from storage.
    ///
    /// Returns `None` if the key doesn't exist.
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> StorageResult<Option<T>>;

    /// Write a value to storage, replacing any previous value.
    async fn write<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> StorageResult<()>;

    /// Remove a value from storage. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check if a key exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Read a value, falling back to `default` when the key is absent or
    /// the read fails.
    async fn get_or<T: DeserializeOwned + Send>(&self, key: &str, default: T) -> T {
        match self.read(key).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "Storage read failed, using default");
                default
            }
        }
    }
}

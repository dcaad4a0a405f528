//! Storage test doubles.

use async_trait::async_trait;
use flashcarder_storage::memory::MemoryStorage;
use flashcarder_storage::{Storage, StorageError, StorageResult};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Storage whose reads work and whose writes always fail with
/// [`StorageError::ReadOnly`].
#[derive(Debug, Default)]
pub struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl ReadOnlyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap storage that already holds data.
    pub fn over(inner: MemoryStorage) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Storage for ReadOnlyStorage {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> StorageResult<Option<T>> {
        self.inner.read(key).await
    }

    async fn write<T: Serialize + Send + Sync>(&self, _key: &str, _value: &T) -> StorageResult<()> {
        Err(StorageError::ReadOnly)
    }

    async fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::ReadOnly)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }
}

/// In-memory storage that counts successful writes.
#[derive(Debug, Default)]
pub struct CountingStorage {
    inner: MemoryStorage,
    writes: AtomicUsize,
}

impl CountingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> StorageResult<Option<T>> {
        self.inner.read(key).await
    }

    async fn write<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> StorageResult<()> {
        self.inner.write(key, value).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_only_rejects_writes() {
        let storage = ReadOnlyStorage::new();
        assert!(matches!(
            storage.write("k", &1).await,
            Err(StorageError::ReadOnly)
        ));
        assert_eq!(storage.read::<i32>("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn counting_counts_writes() {
        let storage = CountingStorage::new();
        storage.write("k", &1).await.unwrap();
        storage.write("k", &2).await.unwrap();
        assert_eq!(storage.writes(), 2);
        assert_eq!(storage.read::<i32>("k").await.unwrap(), Some(2));
    }
}

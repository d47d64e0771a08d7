//! In-memory storage backend
//!
//! Keyed blob storage with no persistence. Used by tests and by offline
//! sessions where the desktop shell has not attached a database-backed
//! handle.

use async_trait::async_trait;
use dashmap::DashMap;

use glossa_domain::error::Result;
use glossa_domain::ports::StorageHandle;

/// Storage handle holding blobs in a concurrent map
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: DashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob, builder style
    pub fn with_blob(self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(key.into(), bytes.into());
        self
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl StorageHandle for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).map(|entry| entry.clone()))
    }

    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.blobs.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.blobs.contains_key(key))
    }
}

//! Restricted execution context passed to providers

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Opaque handle to the application's persistent storage
///
/// Providers read and write blobs by key; the key scheme is the caller's
/// business (file paths, lexicon names, cached pages). The core never
/// interprets the data.
#[async_trait]
pub trait StorageHandle: Send + Sync {
    /// Read the blob stored under `key`, if present
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `bytes` under `key`, replacing any previous value
    async fn write(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Whether a blob exists under `key`
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.read(key).await?.is_some())
    }
}

/// Language detection service
///
/// Best-effort: returns `None` when the text gives no usable signal.
pub trait LanguageDetector: Send + Sync {
    /// Detect the dominant language of `text` as a language code
    fn detect(&self, text: &str) -> Option<String>;
}

/// The restricted context a provider receives on every invocation
///
/// Deliberately small: storage and language detection only. Providers cannot
/// reach the registries through it, so plugin code has no way to enumerate
/// or invoke other plugins' providers.
#[derive(Clone)]
pub struct ProviderContext {
    /// Persistent storage handle
    pub storage: Arc<dyn StorageHandle>,
    /// Language detection service
    pub detector: Arc<dyn LanguageDetector>,
}

impl ProviderContext {
    /// Create a context from its two services
    pub fn new(storage: Arc<dyn StorageHandle>, detector: Arc<dyn LanguageDetector>) -> Self {
        Self { storage, detector }
    }
}

impl std::fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderContext").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneKeyStorage;

    #[async_trait]
    impl StorageHandle for OneKeyStorage {
        async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
            Ok((key == "present").then(|| b"data".to_vec()))
        }

        async fn write(&self, _key: &str, _bytes: Vec<u8>) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn exists_defaults_to_read() {
        let storage = OneKeyStorage;
        assert!(storage.exists("present").await.unwrap());
        assert!(!storage.exists("absent").await.unwrap());
    }
}

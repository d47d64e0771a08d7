//! Shared fixtures for the registry test suite

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use glossa_domain::error::Result;
use glossa_domain::ports::{
    LanguageDetector, ProviderContext, ProviderLifecycle, StorageHandle, SubtitleEngine,
    SubtitleRequest,
};
use glossa_domain::value_objects::SubtitleTrack;

/// Storage that holds nothing
pub struct NullStorage;

#[async_trait]
impl StorageHandle for NullStorage {
    async fn read(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn write(&self, _key: &str, _bytes: Vec<u8>) -> Result<()> {
        Ok(())
    }
}

/// Detector that never detects anything
pub struct NullDetector;

impl LanguageDetector for NullDetector {
    fn detect(&self, _text: &str) -> Option<String> {
        None
    }
}

/// A provider context backed by the null services
pub fn test_context() -> ProviderContext {
    ProviderContext::new(Arc::new(NullStorage), Arc::new(NullDetector))
}

/// Observable lifecycle counters shared between a test and its engines
#[derive(Default)]
pub struct Counters {
    /// Number of factory constructions
    pub constructions: AtomicUsize,
    /// Number of initialize calls
    pub initializations: AtomicUsize,
    /// Number of shutdown calls
    pub shutdowns: AtomicUsize,
    /// Number of generate calls
    pub generations: AtomicUsize,
    /// Notified by the engine when generate starts
    pub started: Notify,
    /// Awaited by the engine before generate returns, when `hold` is set
    pub release: Notify,
}

/// A stateful subtitle engine that records its lifecycle
pub struct CountingEngine {
    counters: Arc<Counters>,
    /// When true, generate blocks until `release` is notified
    hold: bool,
    /// Initialize fails while `initializations` is below this threshold
    fail_initializations_below: usize,
}

impl CountingEngine {
    /// Build a factory closure for registration
    pub fn factory(
        counters: Arc<Counters>,
    ) -> impl Fn() -> Arc<dyn SubtitleEngine> + Send + Sync + 'static {
        Self::factory_with(counters, false, 0)
    }

    /// Build a factory with holding and initialize-failure behavior
    pub fn factory_with(
        counters: Arc<Counters>,
        hold: bool,
        fail_initializations_below: usize,
    ) -> impl Fn() -> Arc<dyn SubtitleEngine> + Send + Sync + 'static {
        move || {
            counters.constructions.fetch_add(1, Ordering::SeqCst);
            let engine: Arc<dyn SubtitleEngine> = Arc::new(CountingEngine {
                counters: Arc::clone(&counters),
                hold,
                fail_initializations_below,
            });
            engine
        }
    }
}

#[async_trait]
impl ProviderLifecycle for CountingEngine {
    async fn initialize(&self, _ctx: &ProviderContext) -> Result<()> {
        // Yield so overlapping first-use callers genuinely race the cell
        tokio::task::yield_now().await;
        let count = self.counters.initializations.fetch_add(1, Ordering::SeqCst) + 1;
        if count < self.fail_initializations_below {
            return Err(glossa_domain::Error::configuration("not ready yet"));
        }
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        self.counters.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl SubtitleEngine for CountingEngine {
    async fn generate(
        &self,
        request: &SubtitleRequest,
        _ctx: &ProviderContext,
    ) -> Result<Vec<SubtitleTrack>> {
        self.counters.generations.fetch_add(1, Ordering::SeqCst);
        if self.hold {
            self.counters.started.notify_one();
            self.counters.release.notified().await;
        }
        let language = request
            .languages
            .first()
            .cloned()
            .unwrap_or_else(|| "en".to_string());
        Ok(vec![SubtitleTrack::new(language, "counting", Vec::new())])
    }
}

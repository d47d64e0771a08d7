//! Application context bootstrap
//!
//! Builds the four registries, attaches the collaborator services and
//! registers the builtin providers. There is no ambient global state: the
//! context owns the registries and everything that needs them receives a
//! reference.

use std::sync::Arc;

use glossa_domain::error::Result;
use glossa_domain::ports::{LanguageDetector, ProviderContext, StorageHandle, SubtitleRequest};
use glossa_providers::{register_builtins, BuiltinOptions, HeuristicDetector, MemoryStorage};
use glossa_registry::{EngineQuery, RegistrySet};

use crate::config::AppConfig;
use crate::plugins::PluginHost;

/// A fully wired application core
pub struct AppContext {
    /// Effective configuration
    pub config: AppConfig,
    /// The four capability registries
    pub registries: RegistrySet,
    storage: Arc<dyn StorageHandle>,
    detector: Arc<dyn LanguageDetector>,
}

impl AppContext {
    /// Bootstrap with the builtin in-memory storage and heuristic detector
    ///
    /// The desktop shell swaps in its database-backed handle via
    /// [`AppContext::bootstrap_with`]; tests and offline runs use this.
    pub fn bootstrap(config: AppConfig) -> Result<Self> {
        Self::bootstrap_with(
            config,
            Arc::new(MemoryStorage::new()),
            Arc::new(HeuristicDetector::new()),
        )
    }

    /// Bootstrap with caller-provided collaborator services
    pub fn bootstrap_with(
        config: AppConfig,
        storage: Arc<dyn StorageHandle>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Result<Self> {
        let registries = RegistrySet::new();
        let options = BuiltinOptions {
            cloud_endpoint: config.subtitles.cloud_endpoint.clone(),
            cloud_api_key: config.subtitles.cloud_api_key.clone(),
            scrape_timeout_secs: config.scraping.timeout_secs,
        };
        register_builtins(&registries, &options)?;
        tracing::info!("application context ready");
        Ok(Self {
            config,
            registries,
            storage,
            detector,
        })
    }

    /// The restricted context handed to providers on every invocation
    pub fn provider_context(&self) -> ProviderContext {
        ProviderContext::new(Arc::clone(&self.storage), Arc::clone(&self.detector))
    }

    /// A plugin host bound to this context's registries
    pub fn plugin_host(&self) -> PluginHost {
        PluginHost::new(self.registries.clone())
    }

    /// Build an engine query for a request, applying configured preferences
    pub fn engine_query(&self, request: &SubtitleRequest) -> EngineQuery {
        let mut query = EngineQuery::from_request(request);
        if self.config.subtitles.prefer_local {
            query = query.with_local_preference();
        }
        if self.config.subtitles.prefer_cloud {
            query = query.with_cloud_preference();
        }
        query
    }

    /// Detect the language of `text`, falling back to the configured default
    pub fn language_of(&self, text: &str) -> String {
        self.detector
            .detect(text)
            .unwrap_or_else(|| self.config.resolution.default_language.clone())
    }

    /// Shut down all registries and their cached provider instances
    pub async fn shutdown(&self) {
        self.registries.shutdown().await;
        tracing::info!("application context shut down");
    }
}

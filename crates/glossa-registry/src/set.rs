//! The application's registry set
//!
//! One instance per process, built by the host at startup and passed by
//! reference to everything that needs it. Registries hold no persistent
//! state; they are rebuilt from scratch on every run.

use std::sync::Arc;

use glossa_domain::error::Result;

use crate::adapters::AdapterRegistry;
use crate::facade::{
    AdapterExtensions, EngineExtensions, ExtensionPoints, ScraperExtensions, TokenizerExtensions,
};
use crate::scrapers::ScraperRegistry;
use crate::subtitles::SubtitleRegistry;
use crate::tokenizers::TokenizerRegistry;

/// Identifies one of the four capability domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// Text tokenizers
    Tokenizers,
    /// Content adapters
    ContentAdapters,
    /// Metadata scrapers
    MetadataScrapers,
    /// Subtitle engines
    SubtitleEngines,
}

impl std::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Tokenizers => "tokenizers",
            Self::ContentAdapters => "content-adapters",
            Self::MetadataScrapers => "metadata-scrapers",
            Self::SubtitleEngines => "subtitle-engines",
        };
        f.write_str(s)
    }
}

/// The four capability registries of a running application
#[derive(Clone)]
pub struct RegistrySet {
    /// Tokenizer registry
    pub tokenizers: Arc<TokenizerRegistry>,
    /// Content adapter registry
    pub adapters: Arc<AdapterRegistry>,
    /// Metadata scraper registry
    pub scrapers: Arc<ScraperRegistry>,
    /// Subtitle engine registry
    pub subtitles: Arc<SubtitleRegistry>,
}

impl RegistrySet {
    /// Create four empty registries
    pub fn new() -> Self {
        Self {
            tokenizers: Arc::new(TokenizerRegistry::new()),
            adapters: Arc::new(AdapterRegistry::new()),
            scrapers: Arc::new(ScraperRegistry::new()),
            subtitles: Arc::new(SubtitleRegistry::new()),
        }
    }

    /// The restricted facades handed to plugin code
    pub fn extension_points(&self) -> ExtensionPoints {
        ExtensionPoints {
            tokenizers: TokenizerExtensions::new(Arc::clone(&self.tokenizers)),
            adapters: AdapterExtensions::new(Arc::clone(&self.adapters)),
            scrapers: ScraperExtensions::new(Arc::clone(&self.scrapers)),
            subtitles: EngineExtensions::new(Arc::clone(&self.subtitles)),
        }
    }

    /// Unregister an id from the registry identified by `kind`
    ///
    /// Used by the plugin lifecycle to tear down everything a plugin
    /// registered, whatever the domain.
    pub async fn unregister(&self, kind: CapabilityKind, id: &str) -> Result<()> {
        match kind {
            CapabilityKind::Tokenizers => self.tokenizers.unregister(id).await,
            CapabilityKind::ContentAdapters => self.adapters.unregister(id).await,
            CapabilityKind::MetadataScrapers => self.scrapers.unregister(id).await,
            CapabilityKind::SubtitleEngines => self.subtitles.unregister(id).await,
        }
    }

    /// Shut down all four registries and their cached instances
    pub async fn shutdown(&self) {
        self.tokenizers.shutdown().await;
        self.adapters.shutdown().await;
        self.scrapers.shutdown().await;
        self.subtitles.shutdown().await;
    }
}

impl Default for RegistrySet {
    fn default() -> Self {
        Self::new()
    }
}

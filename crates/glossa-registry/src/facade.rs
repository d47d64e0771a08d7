//! Plugin-facing registry facades
//!
//! The sandboxing boundary: plugin code gets register and unregister,
//! nothing else. Resolution, listing and the instance cache stay host-only,
//! so a plugin can extend the system but cannot enumerate or force-invoke
//! other plugins' providers.

use std::sync::Arc;

use glossa_domain::error::Result;

use crate::adapters::{AdapterRegistration, AdapterRegistry};
use crate::scrapers::{ScraperRegistration, ScraperRegistry};
use crate::subtitles::{EngineRegistration, SubtitleRegistry};
use crate::tokenizers::{TokenizerRegistration, TokenizerRegistry};

/// Restricted view of the tokenizer registry
#[derive(Clone)]
pub struct TokenizerExtensions {
    registry: Arc<TokenizerRegistry>,
}

impl TokenizerExtensions {
    /// Wrap a registry
    pub fn new(registry: Arc<TokenizerRegistry>) -> Self {
        Self { registry }
    }

    /// Register a tokenizer
    pub fn register(&self, registration: TokenizerRegistration) -> Result<()> {
        self.registry.register(registration)
    }

    /// Unregister a tokenizer by id
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.registry.unregister(id).await
    }
}

/// Restricted view of the content adapter registry
#[derive(Clone)]
pub struct AdapterExtensions {
    registry: Arc<AdapterRegistry>,
}

impl AdapterExtensions {
    /// Wrap a registry
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self { registry }
    }

    /// Register an adapter
    pub fn register(&self, registration: AdapterRegistration) -> Result<()> {
        self.registry.register(registration)
    }

    /// Unregister an adapter by id
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.registry.unregister(id).await
    }
}

/// Restricted view of the metadata scraper registry
#[derive(Clone)]
pub struct ScraperExtensions {
    registry: Arc<ScraperRegistry>,
}

impl ScraperExtensions {
    /// Wrap a registry
    pub fn new(registry: Arc<ScraperRegistry>) -> Self {
        Self { registry }
    }

    /// Register a scraper
    pub fn register(&self, registration: ScraperRegistration) -> Result<()> {
        self.registry.register(registration)
    }

    /// Unregister a scraper by id
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.registry.unregister(id).await
    }
}

/// Restricted view of the subtitle engine registry
#[derive(Clone)]
pub struct EngineExtensions {
    registry: Arc<SubtitleRegistry>,
}

impl EngineExtensions {
    /// Wrap a registry
    pub fn new(registry: Arc<SubtitleRegistry>) -> Self {
        Self { registry }
    }

    /// Register an engine
    pub fn register(&self, registration: EngineRegistration) -> Result<()> {
        self.registry.register(registration)
    }

    /// Unregister an engine by id
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.registry.unregister(id).await
    }
}

/// All four facades, handed to plugin code as one bundle
#[derive(Clone)]
pub struct ExtensionPoints {
    /// Tokenizer registrations
    pub tokenizers: TokenizerExtensions,
    /// Content adapter registrations
    pub adapters: AdapterExtensions,
    /// Metadata scraper registrations
    pub scrapers: ScraperExtensions,
    /// Subtitle engine registrations
    pub subtitles: EngineExtensions,
}

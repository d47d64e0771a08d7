//! Plugin lifecycle
//!
//! Tracks every registration a plugin makes through its registrar and
//! guarantees they are all unregistered when the plugin is disabled, so no
//! cached provider instance survives plugin teardown. Packaging, manifest
//! validation and code loading live in the shell; this component only owns
//! the registration bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use glossa_domain::error::{Error, Result};
use glossa_registry::{
    AdapterRegistration, CapabilityKind, EngineRegistration, ExtensionPoints, RegistrySet,
    ScraperRegistration, TokenizerRegistration,
};

type Recorded = Arc<Mutex<Vec<(CapabilityKind, String)>>>;

/// Tracks installed plugins and what they registered
pub struct PluginHost {
    registries: RegistrySet,
    sessions: Mutex<HashMap<String, Recorded>>,
}

impl PluginHost {
    /// Create a host over the given registries
    pub fn new(registries: RegistrySet) -> Self {
        Self {
            registries,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Begin a plugin session and hand out its registrar
    pub fn install(&self, plugin_id: &str) -> Result<PluginRegistrar> {
        let mut sessions = self.sessions.lock();
        if sessions.contains_key(plugin_id) {
            return Err(Error::configuration(format!(
                "plugin '{plugin_id}' is already installed"
            )));
        }
        let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
        sessions.insert(plugin_id.to_string(), Arc::clone(&recorded));
        tracing::info!(plugin = plugin_id, "plugin installed");
        Ok(PluginRegistrar {
            plugin_id: plugin_id.to_string(),
            points: self.registries.extension_points(),
            recorded,
        })
    }

    /// Tear down a plugin session, unregistering everything it registered
    ///
    /// Teardown is best-effort: a provider the plugin already removed
    /// itself is skipped, other failures are logged, and the remaining
    /// unregistrations still run.
    pub async fn uninstall(&self, plugin_id: &str) -> Result<()> {
        let recorded = self
            .sessions
            .lock()
            .remove(plugin_id)
            .ok_or_else(|| {
                Error::configuration(format!("plugin '{plugin_id}' is not installed"))
            })?;
        let entries: Vec<(CapabilityKind, String)> = {
            let mut recorded = recorded.lock();
            recorded.drain(..).rev().collect()
        };
        for (kind, id) in entries {
            match self.registries.unregister(kind, &id).await {
                Ok(()) => {}
                Err(Error::UnknownProvider { .. }) => {
                    tracing::debug!(plugin = plugin_id, %kind, id, "provider already removed");
                }
                Err(error) => {
                    tracing::warn!(plugin = plugin_id, %kind, id, %error, "teardown unregistration failed");
                }
            }
        }
        tracing::info!(plugin = plugin_id, "plugin uninstalled");
        Ok(())
    }

    /// Ids of currently installed plugins
    pub fn installed(&self) -> Vec<String> {
        self.sessions.lock().keys().cloned().collect()
    }
}

/// The registration surface a plugin sees
///
/// Wraps the registry facades and records every id for teardown. Like the
/// facades themselves, it exposes no resolution, listing or invocation.
pub struct PluginRegistrar {
    plugin_id: String,
    points: ExtensionPoints,
    recorded: Recorded,
}

impl PluginRegistrar {
    /// Id of the plugin this registrar belongs to
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Register a tokenizer
    pub fn register_tokenizer(&self, registration: TokenizerRegistration) -> Result<()> {
        let id = registration.id().to_string();
        self.points.tokenizers.register(registration)?;
        self.record(CapabilityKind::Tokenizers, id);
        Ok(())
    }

    /// Register a content adapter
    pub fn register_adapter(&self, registration: AdapterRegistration) -> Result<()> {
        let id = registration.id().to_string();
        self.points.adapters.register(registration)?;
        self.record(CapabilityKind::ContentAdapters, id);
        Ok(())
    }

    /// Register a metadata scraper
    pub fn register_scraper(&self, registration: ScraperRegistration) -> Result<()> {
        let id = registration.id().to_string();
        self.points.scrapers.register(registration)?;
        self.record(CapabilityKind::MetadataScrapers, id);
        Ok(())
    }

    /// Register a subtitle engine
    pub fn register_engine(&self, registration: EngineRegistration) -> Result<()> {
        let id = registration.id().to_string();
        self.points.subtitles.register(registration)?;
        self.record(CapabilityKind::SubtitleEngines, id);
        Ok(())
    }

    /// Unregister one of this plugin's tokenizers
    pub async fn unregister_tokenizer(&self, id: &str) -> Result<()> {
        self.points.tokenizers.unregister(id).await?;
        self.forget(CapabilityKind::Tokenizers, id);
        Ok(())
    }

    /// Unregister one of this plugin's content adapters
    pub async fn unregister_adapter(&self, id: &str) -> Result<()> {
        self.points.adapters.unregister(id).await?;
        self.forget(CapabilityKind::ContentAdapters, id);
        Ok(())
    }

    /// Unregister one of this plugin's metadata scrapers
    pub async fn unregister_scraper(&self, id: &str) -> Result<()> {
        self.points.scrapers.unregister(id).await?;
        self.forget(CapabilityKind::MetadataScrapers, id);
        Ok(())
    }

    /// Unregister one of this plugin's subtitle engines
    pub async fn unregister_engine(&self, id: &str) -> Result<()> {
        self.points.subtitles.unregister(id).await?;
        self.forget(CapabilityKind::SubtitleEngines, id);
        Ok(())
    }

    fn record(&self, kind: CapabilityKind, id: String) {
        self.recorded.lock().push((kind, id));
    }

    fn forget(&self, kind: CapabilityKind, id: &str) {
        self.recorded
            .lock()
            .retain(|(k, recorded_id)| *k != kind || recorded_id != id);
    }
}

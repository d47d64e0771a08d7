//! Builtin provider registration
//!
//! Called once by the host during bootstrap, before any plugin loads.
//! Builtin providers go through the same registries as plugin providers;
//! nothing here is privileged beyond running first.

use glossa_domain::error::Result;
use glossa_registry::RegistrySet;

use crate::constants::DEFAULT_SCRAPE_TIMEOUT_SECS;
use crate::{adapter, scraper, subtitle, tokenizer};

/// Knobs for the builtin set
#[derive(Debug, Clone)]
pub struct BuiltinOptions {
    /// Endpoint of the hosted transcription service; `None` skips the
    /// cloud caption engine entirely
    pub cloud_endpoint: Option<String>,
    /// Credential for the transcription service
    pub cloud_api_key: Option<String>,
    /// Timeout for metadata scraping requests, in seconds
    pub scrape_timeout_secs: u64,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            cloud_endpoint: None,
            cloud_api_key: None,
            scrape_timeout_secs: DEFAULT_SCRAPE_TIMEOUT_SECS,
        }
    }
}

/// Register every builtin provider into the given registries
pub fn register_builtins(set: &RegistrySet, options: &BuiltinOptions) -> Result<()> {
    set.tokenizers.register(tokenizer::unicode::registration())?;
    set.tokenizers.register(tokenizer::lexicon::registration())?;

    set.adapters.register(adapter::plain_text::registration())?;
    set.adapters.register(adapter::subtitle_file::registration())?;

    set.scrapers.register(scraper::filename::registration())?;
    set.scrapers
        .register(scraper::opengraph::registration(options.scrape_timeout_secs))?;

    set.subtitles.register(subtitle::embedded::registration())?;
    if let Some(endpoint) = &options.cloud_endpoint {
        set.subtitles.register(subtitle::cloud::registration(
            endpoint.clone(),
            options.cloud_api_key.clone(),
        ))?;
    }

    tracing::info!(
        tokenizers = set.tokenizers.list().len(),
        adapters = set.adapters.list().len(),
        scrapers = set.scrapers.list().len(),
        subtitle_engines = set.subtitles.list().len(),
        "builtin providers registered"
    );
    Ok(())
}

//! Application configuration
//!
//! Loaded with Figment: defaults, then an optional TOML file, then
//! `GLOSSA_`-prefixed environment variables, later sources overriding
//! earlier ones.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use glossa_domain::error::{Error, Result};

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "GLOSSA";

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "glossa.toml";

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Resolution defaults
    pub resolution: ResolutionConfig,
    /// Subtitle engine selection and credentials
    pub subtitles: SubtitlesConfig,
    /// Metadata scraping knobs
    pub scraping: ScrapingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json_format: bool,
    /// Also write logs to this file (daily rotation)
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Resolution defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Language assumed when detection gives no answer
    pub default_language: String,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

/// Subtitle engine selection and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitlesConfig {
    /// Prefer engines running on this machine
    pub prefer_local: bool,
    /// Prefer cloud-hosted engines
    pub prefer_cloud: bool,
    /// Endpoint of the hosted transcription service
    pub cloud_endpoint: Option<String>,
    /// Credential for the transcription service
    pub cloud_api_key: Option<String>,
}

impl Default for SubtitlesConfig {
    fn default() -> Self {
        Self {
            prefer_local: true,
            prefer_cloud: false,
            cloud_endpoint: None,
            cloud_api_key: None,
        }
    }
}

/// Metadata scraping knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Timeout for scraping requests, in seconds
    pub timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: glossa_providers::constants::DEFAULT_SCRAPE_TIMEOUT_SECS,
        }
    }
}

/// Configuration loader service
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from all sources
    ///
    /// Merge order (later overrides earlier): defaults, TOML file,
    /// `GLOSSA_`-prefixed environment variables with `_` as the nesting
    /// separator (e.g. `GLOSSA_LOGGING_LEVEL=debug`).
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        let path = self
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Toml::file(&path));
        }

        figment = figment.merge(Env::prefixed(&format!("{CONFIG_ENV_PREFIX}_")).split("_"));

        let config: AppConfig = figment.extract().map_err(|e| Error::Configuration {
            message: "failed to extract configuration".to_string(),
            source: Some(Box::new(e)),
        })?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    crate::logging::parse_log_level(&config.logging.level)?;
    if config.subtitles.prefer_local && config.subtitles.prefer_cloud {
        return Err(Error::configuration(
            "subtitles.prefer_local and subtitles.prefer_cloud are mutually exclusive",
        ));
    }
    if config.subtitles.cloud_endpoint.is_none() && config.subtitles.prefer_cloud {
        return Err(Error::configuration(
            "subtitles.prefer_cloud requires subtitles.cloud_endpoint",
        ));
    }
    Ok(())
}

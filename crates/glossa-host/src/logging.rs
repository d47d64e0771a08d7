//! Structured logging with tracing
//!
//! Configures the tracing ecosystem from [`LoggingConfig`]: env-filtered
//! stdout output, JSON or human-readable, with an optional daily-rotated
//! file layer.

use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use glossa_domain::error::{Error, Result};

pub use crate::config::LoggingConfig;

/// Environment variable overriding the configured filter
pub const LOG_ENV_VAR: &str = "GLOSSA_LOG";

/// Initialize logging with the provided configuration
///
/// Call once at process start; a second call fails because the global
/// subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| std::path::Path::new(".")),
            path.file_stem()
                .unwrap_or_else(|| std::ffi::OsStr::new("glossa")),
        )
    });

    // json_format picks a different layer type, so the branches duplicate
    if config.json_format {
        let stdout = fmt::layer().json().with_target(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    } else {
        let stdout = fmt::layer().with_target(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    }
    .map_err(|e| Error::Configuration {
        message: "logging already initialized".to_string(),
        source: Some(Box::new(e)),
    })?;

    info!(%level, "logging initialized");
    Ok(())
}

/// Parse a log level string to a tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "invalid log level '{level}' (expected trace, debug, info, warn or error)"
        ))),
    }
}

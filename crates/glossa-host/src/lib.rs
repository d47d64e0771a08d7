//! Host Layer - Glossa
//!
//! Cross-cutting concerns around the capability core: configuration
//! loading, logging setup, application bootstrap and the plugin lifecycle.
//! The desktop shell calls into this crate; nothing here knows about
//! windows, views or the database beyond the opaque storage port.

pub mod config;
pub mod context;
pub mod logging;
pub mod plugins;

pub use config::{AppConfig, ConfigLoader};
pub use context::AppContext;
pub use logging::init_logging;
pub use plugins::{PluginHost, PluginRegistrar};

//! Domain Layer - Glossa
//!
//! Core value objects, provider port traits and the error taxonomy for the
//! Glossa capability system. This crate has no knowledge of registries,
//! resolution or the host; it defines WHAT providers produce and consume.
//!
//! ## Contents
//!
//! - `value_objects::*`: tokens, documents, media metadata, subtitle tracks,
//!   media sources
//! - `ports::providers::*`: the four provider traits (`Tokenizer`,
//!   `ContentAdapter`, `MetadataScraper`, `SubtitleEngine`) and their
//!   shared lifecycle
//! - `ports::context::*`: the restricted context handed to providers
//! - `error`: the `Error`/`Result` pair used across the workspace
//! - `lang`: language-code comparison helpers, including the wildcard

pub mod error;
pub mod lang;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::*;
pub use value_objects::*;

//! Builtin subtitle engine providers

pub mod cloud;
pub mod embedded;

pub use cloud::CloudCaptionEngine;

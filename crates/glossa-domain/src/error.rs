//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error source used by variants that wrap foreign failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the Glossa core
#[derive(Error, Debug)]
pub enum Error {
    /// A provider with the same id is already registered in this registry
    #[error("provider '{id}' is already registered")]
    DuplicateProvider {
        /// Id of the conflicting registration
        id: String,
    },

    /// Lookup or unregistration of an id that is not present
    #[error("unknown provider '{id}'")]
    UnknownProvider {
        /// Id that was not found
        id: String,
    },

    /// Resolution finished with zero eligible candidates
    ///
    /// This is the typed form of the soft no-match outcome: `resolve` itself
    /// returns `None`, and the combined resolve-and-invoke operations
    /// translate that into this error so callers get a cause they can report.
    #[error("no {domain} provider matched the given criteria")]
    NoMatch {
        /// Registry domain that failed to produce a candidate
        domain: &'static str,
    },

    /// A provider's URL-matching expression failed to compile
    #[error("provider '{id}' declared an invalid URL pattern '{pattern}'")]
    InvalidPattern {
        /// Id of the provider that declared the pattern
        id: String,
        /// The pattern as written by the provider author
        pattern: String,
        /// The underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// Provider code failed or panicked during invocation
    ///
    /// Carries the provider id so the calling feature can report which
    /// plugin misbehaved. Never propagated as a panic to host logic.
    #[error("provider '{id}' failed during invocation")]
    ProviderFailed {
        /// Id of the provider that failed
        id: String,
        /// The underlying cause
        #[source]
        source: BoxedSource,
    },

    /// Storage handle operation error
    #[error("storage error: {message}")]
    Storage {
        /// Description of the storage error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Network-related error
    #[error("network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Input that a provider cannot work with
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid input
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a storage error with a message
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with a message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with a message and source
    pub fn network(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an invalid-input error with a message
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Wrap a provider failure, tagging it with the offending provider id
    pub fn provider_failed(id: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self::ProviderFailed {
            id: id.into(),
            source: source.into(),
        }
    }

    /// Whether this error is the soft no-match outcome
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }
}

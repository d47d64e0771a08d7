//! Provider port traits and request payloads
//!
//! Each capability domain defines one object-safe trait for stateful
//! providers plus a request payload struct. Stateless providers implement
//! the same operations as plain async closures; the registry layer unifies
//! the two styles at the call boundary.

use async_trait::async_trait;

use crate::error::Result;
use crate::ports::context::ProviderContext;
use crate::value_objects::{Document, InputKind, MediaMetadata, MediaSource, SubtitleTrack, Token};

/// Lifecycle hooks shared by all stateful providers
///
/// `initialize` runs once, before the first operation call, and must
/// complete or fail before the instance is used. `shutdown` runs when the
/// registration is removed or the registry is torn down; failures are
/// logged by the caller, not propagated.
#[async_trait]
pub trait ProviderLifecycle: Send + Sync {
    /// Prepare the instance for use (load models, open clients)
    async fn initialize(&self, _ctx: &ProviderContext) -> Result<()> {
        Ok(())
    }

    /// Release resources held by the instance
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// Payload for a tokenization call
#[derive(Debug, Clone)]
pub struct TokenizeRequest {
    /// Language the text is written in
    pub language: String,
    /// The text to segment
    pub text: String,
}

impl TokenizeRequest {
    /// Create a request
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Splits text into tokens for one or more languages
#[async_trait]
pub trait Tokenizer: ProviderLifecycle {
    /// Tokenize the request text
    async fn tokenize(&self, request: &TokenizeRequest, ctx: &ProviderContext) -> Result<Vec<Token>>;
}

/// Payload for a content adaptation call
#[derive(Debug, Clone)]
pub struct AdaptRequest {
    /// The input to adapt
    pub source: MediaSource,
}

impl AdaptRequest {
    /// Create a request
    pub fn new(source: MediaSource) -> Self {
        Self { source }
    }
}

/// Adapts raw content into a study document
#[async_trait]
pub trait ContentAdapter: ProviderLifecycle {
    /// Produce a document from the request source
    async fn adapt(&self, request: &AdaptRequest, ctx: &ProviderContext) -> Result<Document>;
}

/// Payload for a metadata scraping call
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// The input to describe
    pub source: MediaSource,
}

impl ScrapeRequest {
    /// Create a request
    pub fn new(source: MediaSource) -> Self {
        Self { source }
    }
}

/// Scrapes display metadata for a media source
#[async_trait]
pub trait MetadataScraper: ProviderLifecycle {
    /// Collect whatever metadata the source offers
    async fn scrape(&self, request: &ScrapeRequest, ctx: &ProviderContext) -> Result<MediaMetadata>;
}

/// Payload for a subtitle generation call
#[derive(Debug, Clone)]
pub struct SubtitleRequest {
    /// The media to caption
    pub source: MediaSource,
    /// Languages the caller wants tracks for
    pub languages: Vec<String>,
    /// Kind of input being handed to the engine
    pub input_kind: InputKind,
}

impl SubtitleRequest {
    /// Create a request
    pub fn new(source: MediaSource, languages: Vec<String>, input_kind: InputKind) -> Self {
        Self {
            source,
            languages,
            input_kind,
        }
    }
}

/// Generates or extracts subtitle tracks for media
#[async_trait]
pub trait SubtitleEngine: ProviderLifecycle {
    /// Produce subtitle tracks for the requested languages
    async fn generate(
        &self,
        request: &SubtitleRequest,
        ctx: &ProviderContext,
    ) -> Result<Vec<SubtitleTrack>>;
}

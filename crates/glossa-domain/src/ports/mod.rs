//! Ports (interfaces) for provider implementations and host collaborators
//!
//! The registries invoke providers exclusively through these traits. The
//! storage handle and language detector are host services handed opaquely to
//! providers via [`ProviderContext`]; the core never inspects them.

pub mod context;
pub mod providers;

pub use context::{LanguageDetector, ProviderContext, StorageHandle};
pub use providers::{
    AdaptRequest, ContentAdapter, MetadataScraper, ProviderLifecycle, ScrapeRequest,
    SubtitleEngine, SubtitleRequest, TokenizeRequest, Tokenizer,
};

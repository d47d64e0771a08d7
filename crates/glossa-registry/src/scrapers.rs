//! Metadata scraper registry
//!
//! Same additive selection as content adapters: the scraper matching the
//! most dimensions of the source wins.

use std::sync::Arc;

use futures::future::BoxFuture;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{MetadataScraper, ProviderContext, ScrapeRequest};
use glossa_domain::value_objects::MediaMetadata;

use crate::invoke;
use crate::meta::ProviderMeta;
use crate::pattern::UrlPattern;
use crate::query::SourceQuery;
use crate::resolve::{self, SourceAffinity};
use crate::store::{Describe, ProviderImpl, Registration, Store};

/// Call signature of a stateless metadata scraper
pub type ScrapeFn = Arc<
    dyn Fn(ScrapeRequest, ProviderContext) -> BoxFuture<'static, Result<MediaMetadata>>
        + Send
        + Sync,
>;

/// A metadata scraper registration
pub type ScraperRegistration = Registration<ScraperDescriptor, ScrapeFn, dyn MetadataScraper>;

/// What a metadata scraper can handle
#[derive(Debug, Clone)]
pub struct ScraperDescriptor {
    /// Display metadata and tie-break priority
    pub meta: ProviderMeta,
    /// MIME types this scraper accepts
    pub mime_types: Vec<String>,
    /// File extensions this scraper accepts (lowercase, no dot)
    pub file_extensions: Vec<String>,
    /// URL patterns this scraper claims
    pub url_patterns: Vec<UrlPattern>,
    /// Can describe files on the local machine
    pub local_files: bool,
    /// Can fetch remote URLs
    pub remote_urls: bool,
}

impl ScraperDescriptor {
    /// Create a descriptor with the given id and no predicates
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            meta: ProviderMeta::new(id),
            mime_types: Vec::new(),
            file_extensions: Vec::new(),
            url_patterns: Vec::new(),
            local_files: false,
            remote_urls: false,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.meta.name = name.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = description.into();
        self
    }

    /// Set the tie-break priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.meta.priority = priority;
        self
    }

    /// Add an accepted MIME type
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_types.push(mime.into());
        self
    }

    /// Add an accepted file extension
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extensions
            .push(extension.into().to_ascii_lowercase());
        self
    }

    /// Add a URL pattern; fails fast on a malformed expression
    pub fn with_url_pattern(mut self, pattern: impl Into<String>) -> Result<Self> {
        let compiled = UrlPattern::compile(&self.meta.id, pattern)?;
        self.url_patterns.push(compiled);
        Ok(self)
    }

    /// Mark the scraper as able to describe local files
    pub fn for_local_files(mut self) -> Self {
        self.local_files = true;
        self
    }

    /// Mark the scraper as able to fetch remote URLs
    pub fn for_remote_urls(mut self) -> Self {
        self.remote_urls = true;
        self
    }
}

impl Describe for ScraperDescriptor {
    fn meta(&self) -> &ProviderMeta {
        &self.meta
    }
}

impl SourceAffinity for ScraperDescriptor {
    fn mime_types(&self) -> &[String] {
        &self.mime_types
    }

    fn file_extensions(&self) -> &[String] {
        &self.file_extensions
    }

    fn url_patterns(&self) -> &[UrlPattern] {
        &self.url_patterns
    }

    fn handles_local_files(&self) -> bool {
        self.local_files
    }

    fn handles_urls(&self) -> bool {
        self.remote_urls
    }
}

/// Registry of metadata scrapers
pub struct ScraperRegistry {
    store: Store<ScraperDescriptor, ScrapeFn, dyn MetadataScraper>,
}

impl ScraperRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            store: Store::new("metadata-scraper"),
        }
    }

    /// Register a scraper
    pub fn register(&self, registration: ScraperRegistration) -> Result<()> {
        self.store.register(registration)
    }

    /// Unregister a scraper, shutting down its cached instance if any
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.store.unregister(id).await
    }

    /// Snapshot of all registered descriptors, in insertion order
    pub fn list(&self) -> Vec<Arc<ScraperDescriptor>> {
        self.store.list()
    }

    /// Select the most specific scraper for a source query
    pub fn resolve(&self, query: &SourceQuery) -> Option<ScraperRegistration> {
        resolve::select_by_source(&self.store.snapshot(), query)
    }

    /// Resolve against the request's source and invoke in one step
    pub async fn scrape(
        &self,
        request: ScrapeRequest,
        ctx: &ProviderContext,
    ) -> Result<MediaMetadata> {
        let query = SourceQuery::from_source(&request.source);
        let Some(registration) = self.resolve(&query) else {
            return Err(Error::NoMatch {
                domain: self.store.domain(),
            });
        };
        self.invoke(&registration, request, ctx).await
    }

    /// Invoke a previously resolved registration
    pub async fn invoke(
        &self,
        registration: &ScraperRegistration,
        request: ScrapeRequest,
        ctx: &ProviderContext,
    ) -> Result<MediaMetadata> {
        match registration.implementation() {
            ProviderImpl::Function(call) => {
                invoke::guarded(
                    self.store.domain(),
                    registration.id(),
                    call(request, ctx.clone()),
                )
                .await
            }
            ProviderImpl::Factory(_) => {
                let provider = self.store.instance(registration, ctx).await?;
                invoke::guarded(
                    self.store.domain(),
                    registration.id(),
                    provider.scrape(&request, ctx),
                )
                .await
            }
        }
    }

    /// Shut down every cached instance and drop all registrations
    pub async fn shutdown(&self) {
        self.store.shutdown().await;
    }
}

impl Default for ScraperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

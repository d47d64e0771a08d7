//! Content adapter registry
//!
//! Adapters turn raw input (a file, a URL, pasted text) into a study
//! document. Selection is specificity-gated: the additive resolver rewards
//! every dimension of the source a candidate matches.

use std::sync::Arc;

use futures::future::BoxFuture;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{AdaptRequest, ContentAdapter, ProviderContext};
use glossa_domain::value_objects::Document;

use crate::invoke;
use crate::meta::ProviderMeta;
use crate::pattern::UrlPattern;
use crate::query::SourceQuery;
use crate::resolve::{self, SourceAffinity};
use crate::store::{Describe, ProviderImpl, Registration, Store};

/// Call signature of a stateless content adapter
pub type AdaptFn = Arc<
    dyn Fn(AdaptRequest, ProviderContext) -> BoxFuture<'static, Result<Document>> + Send + Sync,
>;

/// A content adapter registration
pub type AdapterRegistration = Registration<AdapterDescriptor, AdaptFn, dyn ContentAdapter>;

/// What a content adapter can handle
#[derive(Debug, Clone)]
pub struct AdapterDescriptor {
    /// Display metadata and tie-break priority
    pub meta: ProviderMeta,
    /// MIME types this adapter accepts
    pub mime_types: Vec<String>,
    /// File extensions this adapter accepts (lowercase, no dot)
    pub file_extensions: Vec<String>,
    /// URL patterns this adapter claims
    pub url_patterns: Vec<UrlPattern>,
    /// Can read files on the local machine
    pub local_files: bool,
    /// Can fetch remote URLs
    pub remote_urls: bool,
    /// Accepts pasted text
    pub pasted_text: bool,
}

impl AdapterDescriptor {
    /// Create a descriptor with the given id and no predicates
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            meta: ProviderMeta::new(id),
            mime_types: Vec::new(),
            file_extensions: Vec::new(),
            url_patterns: Vec::new(),
            local_files: false,
            remote_urls: false,
            pasted_text: false,
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

    /// Mark the adapter as able to read local files
    pub fn for_local_files(mut self) -> Self {
        self.local_files = true;
        self
    }

    /// Mark the adapter as able to fetch remote URLs
    pub fn for_remote_urls(mut self) -> Self {
        self.remote_urls = true;
        self
    }

    /// Mark the adapter as accepting pasted text
    pub fn for_pasted_text(mut self) -> Self {
        self.pasted_text = true;
        self
    }
}

impl Describe for AdapterDescriptor {
    fn meta(&self) -> &ProviderMeta {
        &self.meta
    }
}

impl SourceAffinity for AdapterDescriptor {
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

    fn handles_pasted_text(&self) -> bool {
        self.pasted_text
    }
}

/// Registry of content adapters
pub struct AdapterRegistry {
    store: Store<AdapterDescriptor, AdaptFn, dyn ContentAdapter>,
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            store: Store::new("content-adapter"),
        }
    }

    /// Register an adapter
    pub fn register(&self, registration: AdapterRegistration) -> Result<()> {
        self.store.register(registration)
    }

    /// Unregister an adapter, shutting down its cached instance if any
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.store.unregister(id).await
    }

    /// Snapshot of all registered descriptors, in insertion order
    pub fn list(&self) -> Vec<Arc<AdapterDescriptor>> {
        self.store.list()
    }

    /// Select the most specific adapter for a source query
    pub fn resolve(&self, query: &SourceQuery) -> Option<AdapterRegistration> {
        resolve::select_by_source(&self.store.snapshot(), query)
    }

    /// Resolve against the request's source and invoke in one step
    pub async fn adapt(&self, request: AdaptRequest, ctx: &ProviderContext) -> Result<Document> {
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
        registration: &AdapterRegistration,
        request: AdaptRequest,
        ctx: &ProviderContext,
    ) -> Result<Document> {
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
                    provider.adapt(&request, ctx),
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

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

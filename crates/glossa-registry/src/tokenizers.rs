//! Tokenizer registry
//!
//! Tokenizers are language-gated: a registration is eligible for a request
//! only if it declares the requested language or the wildcard, and an exact
//! language match always beats a wildcard fallback regardless of priority.

use std::sync::Arc;

use futures::future::BoxFuture;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{ProviderContext, TokenizeRequest, Tokenizer};
use glossa_domain::value_objects::Token;

use crate::invoke;
use crate::meta::ProviderMeta;
use crate::resolve::{self, LanguageAffinity};
use crate::store::{Describe, ProviderImpl, Registration, Store};

/// Call signature of a stateless tokenizer
pub type TokenizeFn = Arc<
    dyn Fn(TokenizeRequest, ProviderContext) -> BoxFuture<'static, Result<Vec<Token>>>
        + Send
        + Sync,
>;

/// A tokenizer registration
pub type TokenizerRegistration = Registration<TokenizerDescriptor, TokenizeFn, dyn Tokenizer>;

/// What a tokenizer can handle
#[derive(Debug, Clone)]
pub struct TokenizerDescriptor {
    /// Display metadata and tie-break priority
    pub meta: ProviderMeta,
    /// Supported language codes; may include the wildcard `*`
    pub languages: Vec<String>,
}

impl TokenizerDescriptor {
    /// Create a descriptor with the given id and no languages
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            meta: ProviderMeta::new(id),
            languages: Vec::new(),
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

    /// Add one supported language
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.languages.push(code.into());
        self
    }

    /// Add several supported languages
    pub fn with_languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.extend(codes.into_iter().map(Into::into));
        self
    }
}

impl Describe for TokenizerDescriptor {
    fn meta(&self) -> &ProviderMeta {
        &self.meta
    }
}

impl LanguageAffinity for TokenizerDescriptor {
    fn language_codes(&self) -> &[String] {
        &self.languages
    }
}

/// Registry of tokenizer providers
pub struct TokenizerRegistry {
    store: Store<TokenizerDescriptor, TokenizeFn, dyn Tokenizer>,
}

impl TokenizerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            store: Store::new("tokenizer"),
        }
    }

    /// Register a tokenizer
    pub fn register(&self, registration: TokenizerRegistration) -> Result<()> {
        self.store.register(registration)
    }

    /// Unregister a tokenizer, shutting down its cached instance if any
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.store.unregister(id).await
    }

    /// Snapshot of all registered descriptors, in insertion order
    pub fn list(&self) -> Vec<Arc<TokenizerDescriptor>> {
        self.store.list()
    }

    /// Select the best tokenizer for a language
    pub fn resolve(&self, language: &str) -> Option<TokenizerRegistration> {
        resolve::select_by_language(&self.store.snapshot(), language)
    }

    /// Resolve and invoke in one step
    ///
    /// Translates "no eligible tokenizer" into a typed no-match error.
    pub async fn tokenize(
        &self,
        request: TokenizeRequest,
        ctx: &ProviderContext,
    ) -> Result<Vec<Token>> {
        let Some(registration) = self.resolve(&request.language) else {
            return Err(Error::NoMatch {
                domain: self.store.domain(),
            });
        };
        self.invoke(&registration, request, ctx).await
    }

    /// Invoke a previously resolved registration
    ///
    /// The registration is a by-value handle: invocation still works if the
    /// provider was unregistered in the meantime, as long as no fresh
    /// instance construction is required.
    pub async fn invoke(
        &self,
        registration: &TokenizerRegistration,
        request: TokenizeRequest,
        ctx: &ProviderContext,
    ) -> Result<Vec<Token>> {
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
                    provider.tokenize(&request, ctx),
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

impl Default for TokenizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

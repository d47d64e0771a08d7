//! Subtitle engine registry
//!
//! Engine selection is capability-gated, not specificity-gated: engines
//! that cannot handle the input kind or any requested language are excluded
//! outright, and among the survivors a local/cloud preference picks the
//! first match in registration order. Priority plays no role here.

use std::sync::Arc;

use futures::future::BoxFuture;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{ProviderContext, SubtitleEngine, SubtitleRequest};
use glossa_domain::value_objects::{InputKind, SubtitleTrack};

use crate::invoke;
use crate::meta::ProviderMeta;
use crate::query::EngineQuery;
use crate::resolve::{self, EngineAffinity};
use crate::store::{Describe, ProviderImpl, Registration, Store};

/// Call signature of a stateless subtitle engine
pub type GenerateFn = Arc<
    dyn Fn(SubtitleRequest, ProviderContext) -> BoxFuture<'static, Result<Vec<SubtitleTrack>>>
        + Send
        + Sync,
>;

/// A subtitle engine registration
pub type EngineRegistration = Registration<EngineDescriptor, GenerateFn, dyn SubtitleEngine>;

/// What a subtitle engine can do
#[derive(Debug, Clone)]
pub struct EngineDescriptor {
    /// Display metadata and tie-break priority
    pub meta: ProviderMeta,
    /// Input kinds the engine accepts
    pub input_kinds: Vec<InputKind>,
    /// Languages the engine can produce; may include the wildcard `*`
    pub languages: Vec<String>,
    /// Whether the engine calls out to a cloud service
    pub cloud_service: bool,
    /// Whether the engine needs a credential before it can run
    pub requires_credential: bool,
}

impl EngineDescriptor {
    /// Create a descriptor with the given id and no capabilities
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            meta: ProviderMeta::new(id),
            input_kinds: Vec::new(),
            languages: Vec::new(),
            cloud_service: false,
            requires_credential: false,
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

    /// Add an accepted input kind
    pub fn with_input_kind(mut self, kind: InputKind) -> Self {
        self.input_kinds.push(kind);
        self
    }

    /// Add several accepted input kinds
    pub fn with_input_kinds<I: IntoIterator<Item = InputKind>>(mut self, kinds: I) -> Self {
        self.input_kinds.extend(kinds);
        self
    }

    /// Add a producible language
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.languages.push(code.into());
        self
    }

    /// Add several producible languages
    pub fn with_languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Mark the engine as cloud-hosted
    pub fn with_cloud_service(mut self) -> Self {
        self.cloud_service = true;
        self
    }

    /// Mark the engine as requiring a credential
    pub fn with_credential_required(mut self) -> Self {
        self.requires_credential = true;
        self
    }
}

impl Describe for EngineDescriptor {
    fn meta(&self) -> &ProviderMeta {
        &self.meta
    }
}

impl EngineAffinity for EngineDescriptor {
    fn input_kinds(&self) -> &[InputKind] {
        &self.input_kinds
    }

    fn language_codes(&self) -> &[String] {
        &self.languages
    }

    fn is_cloud_service(&self) -> bool {
        self.cloud_service
    }
}

/// Registry of subtitle engines
pub struct SubtitleRegistry {
    store: Store<EngineDescriptor, GenerateFn, dyn SubtitleEngine>,
}

impl SubtitleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            store: Store::new("subtitle-engine"),
        }
    }

    /// Register an engine
    pub fn register(&self, registration: EngineRegistration) -> Result<()> {
        self.store.register(registration)
    }

    /// Unregister an engine, shutting down its cached instance if any
    pub async fn unregister(&self, id: &str) -> Result<()> {
        self.store.unregister(id).await
    }

    /// Snapshot of all registered descriptors, in insertion order
    pub fn list(&self) -> Vec<Arc<EngineDescriptor>> {
        self.store.list()
    }

    /// Select an engine capable of serving the query
    pub fn resolve(&self, query: &EngineQuery) -> Option<EngineRegistration> {
        resolve::select_engine(&self.store.snapshot(), query)
    }

    /// Resolve with the given criteria and invoke in one step
    pub async fn generate(
        &self,
        request: SubtitleRequest,
        query: &EngineQuery,
        ctx: &ProviderContext,
    ) -> Result<Vec<SubtitleTrack>> {
        let Some(registration) = self.resolve(query) else {
            return Err(Error::NoMatch {
                domain: self.store.domain(),
            });
        };
        self.invoke(&registration, request, ctx).await
    }

    /// Invoke a previously resolved registration
    pub async fn invoke(
        &self,
        registration: &EngineRegistration,
        request: SubtitleRequest,
        ctx: &ProviderContext,
    ) -> Result<Vec<SubtitleTrack>> {
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
                    provider.generate(&request, ctx),
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

impl Default for SubtitleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Shared registration store
//!
//! One [`Store`] instance backs each capability registry. It owns the
//! insertion-ordered registration list and the lazy instance cache for
//! constructor-style providers. All mutation goes through its methods; the
//! lock is never held across an await, so a resolution pass always scores a
//! consistent snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::OnceCell;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{ProviderContext, ProviderLifecycle};

use crate::invoke;
use crate::meta::ProviderMeta;

/// Access to the shared display metadata of a capability descriptor
pub trait Describe: Send + Sync + 'static {
    /// The descriptor's display metadata
    fn meta(&self) -> &ProviderMeta;

    /// Unique provider id
    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Tie-break priority
    fn priority(&self) -> i32 {
        self.meta().priority
    }
}

/// Factory producing a stateful provider instance from its descriptor
pub type Factory<D, P> = Arc<dyn Fn(&D) -> Result<Arc<P>> + Send + Sync>;

/// The implementation half of a registration
///
/// Exactly one style per registration: a stateless call or a factory for a
/// lazily-constructed stateful instance. The tagged variant keeps both
/// styles behind one call boundary without reflection.
pub enum ProviderImpl<D, F, P: ?Sized> {
    /// Stateless: invoked directly with the request payload and context
    Function(F),
    /// Stateful: constructed on first use, initialized, then cached
    Factory(Factory<D, P>),
}

impl<D, F: Clone, P: ?Sized> Clone for ProviderImpl<D, F, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Function(call) => Self::Function(call.clone()),
            Self::Factory(make) => Self::Factory(Arc::clone(make)),
        }
    }
}

impl<D, F, P: ?Sized> std::fmt::Debug for ProviderImpl<D, F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function(_) => f.write_str("ProviderImpl::Function"),
            Self::Factory(_) => f.write_str("ProviderImpl::Factory"),
        }
    }
}

/// A descriptor bound to its implementation
///
/// Handed back by value from `resolve`, so a caller's handle stays valid
/// even if the registration is removed before the invocation runs.
pub struct Registration<D, F, P: ?Sized> {
    pub(crate) descriptor: Arc<D>,
    pub(crate) implementation: ProviderImpl<D, F, P>,
}

impl<D, F: Clone, P: ?Sized> Clone for Registration<D, F, P> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            implementation: self.implementation.clone(),
        }
    }
}

impl<D: Describe, F, P: ?Sized> Registration<D, F, P> {
    /// Bind a descriptor to a stateless call
    pub fn function(descriptor: D, call: F) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            implementation: ProviderImpl::Function(call),
        }
    }

    /// Bind a descriptor to a factory for a stateful provider
    pub fn factory<M>(descriptor: D, make: M) -> Self
    where
        M: Fn(&D) -> Result<Arc<P>> + Send + Sync + 'static,
    {
        Self {
            descriptor: Arc::new(descriptor),
            implementation: ProviderImpl::Factory(Arc::new(make)),
        }
    }

    /// The bound descriptor
    pub fn descriptor(&self) -> &D {
        &self.descriptor
    }

    /// Provider id
    pub fn id(&self) -> &str {
        self.descriptor.id()
    }

    /// The implementation variant
    pub fn implementation(&self) -> &ProviderImpl<D, F, P> {
        &self.implementation
    }

    /// Whether this registration constructs a stateful instance
    pub fn is_stateful(&self) -> bool {
        matches!(self.implementation, ProviderImpl::Factory(_))
    }
}

struct StoreState<D, F, P: ?Sized> {
    entries: Vec<Registration<D, F, P>>,
    instances: HashMap<String, Arc<OnceCell<Arc<P>>>>,
}

/// Keyed, insertion-ordered store of registrations for one capability domain
pub struct Store<D, F, P: ?Sized> {
    domain: &'static str,
    state: RwLock<StoreState<D, F, P>>,
}

impl<D, F, P> Store<D, F, P>
where
    D: Describe,
    F: Clone,
    P: ?Sized + ProviderLifecycle + 'static,
{
    /// Create an empty store for `domain` (used in log fields and no-match
    /// errors)
    pub fn new(domain: &'static str) -> Self {
        Self {
            domain,
            state: RwLock::new(StoreState {
                entries: Vec::new(),
                instances: HashMap::new(),
            }),
        }
    }

    /// The domain label of this store
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// Insert a registration, preserving insertion order
    ///
    /// Fails without touching the store if the id is already present.
    pub fn register(&self, registration: Registration<D, F, P>) -> Result<()> {
        let mut state = self.state.write();
        let id = registration.id();
        if state.entries.iter().any(|r| r.id() == id) {
            return Err(Error::DuplicateProvider { id: id.to_string() });
        }
        tracing::debug!(domain = self.domain, id, "provider registered");
        state.entries.push(registration);
        Ok(())
    }

    /// Remove a registration and shut down its cached instance, if any
    ///
    /// The entry and its cache slot are removed atomically, so subsequent
    /// `list` and `resolve` calls no longer see the provider; the shutdown
    /// hook then runs best-effort, with failures logged rather than
    /// propagated.
    pub async fn unregister(&self, id: &str) -> Result<()> {
        let cell = {
            let mut state = self.state.write();
            let position = state
                .entries
                .iter()
                .position(|r| r.id() == id)
                .ok_or_else(|| Error::UnknownProvider { id: id.to_string() })?;
            state.entries.remove(position);
            state.instances.remove(id)
        };
        if let Some(cell) = cell {
            self.shutdown_instance(id, &cell).await;
        }
        tracing::debug!(domain = self.domain, id, "provider unregistered");
        Ok(())
    }

    /// Snapshot of all current descriptors, in insertion order
    pub fn list(&self) -> Vec<Arc<D>> {
        let state = self.state.read();
        state
            .entries
            .iter()
            .map(|r| Arc::clone(&r.descriptor))
            .collect()
    }

    /// Snapshot of all current registrations, in insertion order
    ///
    /// Taken atomically; a concurrent unregister cannot corrupt a scoring
    /// pass that works from this copy.
    pub fn snapshot(&self) -> Vec<Registration<D, F, P>> {
        self.state.read().entries.clone()
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether the store holds no registrations
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Get or lazily construct the cached instance for a factory-style
    /// registration
    ///
    /// Construction and the initialize hook are serialized per id: the
    /// first caller runs them inside the cell, concurrent callers await the
    /// same cell. A failed initialize leaves the cell empty so a later call
    /// may retry. If the registration was removed and no instance is
    /// cached, a fresh construction is refused.
    pub(crate) async fn instance(
        &self,
        registration: &Registration<D, F, P>,
        ctx: &ProviderContext,
    ) -> Result<Arc<P>> {
        let id = registration.id();
        let ProviderImpl::Factory(make) = registration.implementation() else {
            return Err(Error::provider_failed(
                id,
                "function-style registration has no instance".to_string(),
            ));
        };
        let cell = {
            let mut state = self.state.write();
            match state.instances.get(id) {
                Some(cell) => Arc::clone(cell),
                None => {
                    if !state.entries.iter().any(|r| r.id() == id) {
                        return Err(Error::UnknownProvider { id: id.to_string() });
                    }
                    let cell = Arc::new(OnceCell::new());
                    state.instances.insert(id.to_string(), Arc::clone(&cell));
                    cell
                }
            }
        };
        let make = Arc::clone(make);
        let descriptor = Arc::clone(&registration.descriptor);
        let instance = cell
            .get_or_try_init(|| async {
                let built =
                    invoke::guarded_sync(self.domain, id, || make(descriptor.as_ref()))?;
                invoke::guarded(self.domain, id, built.initialize(ctx)).await?;
                tracing::debug!(domain = self.domain, id, "provider instance initialized");
                Ok::<_, Error>(built)
            })
            .await?;
        Ok(Arc::clone(instance))
    }

    /// Tear the store down: drop all registrations and shut down every
    /// cached instance
    pub async fn shutdown(&self) {
        let instances: Vec<(String, Arc<OnceCell<Arc<P>>>)> = {
            let mut state = self.state.write();
            state.entries.clear();
            state.instances.drain().collect()
        };
        for (id, cell) in instances {
            self.shutdown_instance(&id, &cell).await;
        }
        tracing::debug!(domain = self.domain, "registry shut down");
    }

    async fn shutdown_instance(&self, id: &str, cell: &OnceCell<Arc<P>>) {
        // An in-flight construction finds its cell orphaned; the instance it
        // builds is dropped with the caller's handle.
        let Some(instance) = cell.get() else { return };
        if let Err(error) = invoke::guarded(self.domain, id, instance.shutdown()).await {
            tracing::warn!(domain = self.domain, id, %error, "provider shutdown failed");
        } else {
            tracing::debug!(domain = self.domain, id, "provider instance shut down");
        }
    }
}

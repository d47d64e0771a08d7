//! Invocation guards
//!
//! Every call into provider code - function-style calls, factory
//! construction, lifecycle hooks and operation methods - goes through these
//! guards. Errors and panics are both mapped to a tagged failure carrying
//! the provider id, so misbehaving plugin code can never take the host down.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use glossa_domain::error::{Error, Result};

/// Run an async provider operation, catching errors and panics
pub(crate) async fn guarded<T>(
    domain: &'static str,
    id: &str,
    operation: impl Future<Output = Result<T>>,
) -> Result<T> {
    match AssertUnwindSafe(operation).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => {
            tracing::debug!(domain, id, error = %source, "provider call failed");
            Err(Error::provider_failed(id, source))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(domain, id, message, "provider panicked");
            Err(Error::provider_failed(id, message))
        }
    }
}

/// Run a synchronous provider callback (factory construction), catching
/// errors and panics
pub(crate) fn guarded_sync<T>(
    domain: &'static str,
    id: &str,
    operation: impl FnOnce() -> Result<T>,
) -> Result<T> {
    match std::panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => {
            tracing::debug!(domain, id, error = %source, "provider construction failed");
            Err(Error::provider_failed(id, source))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(domain, id, message, "provider construction panicked");
            Err(Error::provider_failed(id, message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "provider panicked".to_string()
    }
}

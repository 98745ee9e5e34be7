//! Method name to handler bindings.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::context::ServerContext;

use super::DISPATCH_TARGET;
use super::errors::{HandlerError, RpcError};
use super::params::Params;

/// Callable bound to a method name.
///
/// Plain functions with the matching signature implement this trait, so
/// handlers are usually registered as `fn` items.
pub trait MethodHandler: Send + Sync {
    /// Runs the method against the server context.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] that the dispatcher turns into a JSON-RPC
    /// error response.
    fn call(&self, context: &ServerContext, params: Params) -> Result<Value, HandlerError>;
}

impl<F> MethodHandler for F
where
    F: Fn(&ServerContext, Params) -> Result<Value, HandlerError> + Send + Sync,
{
    fn call(&self, context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
        self(context, params)
    }
}

/// Shared reference to a bound handler.
pub type SharedHandler = Arc<dyn MethodHandler>;

/// Mutable mapping from method name to handler.
///
/// Lookups clone the handler out of the table before it runs, so a handler
/// may register further methods (as `initialize` does) without deadlocking.
#[derive(Default)]
pub struct DispatchTable {
    handlers: RwLock<HashMap<String, SharedHandler>>,
}

impl DispatchTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `method` to `handler`, replacing any previous binding.
    pub fn register(&self, method: impl Into<String>, handler: impl MethodHandler + 'static) {
        let method = method.into();
        debug!(target: DISPATCH_TARGET, method = %method, "registering method");
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(method, Arc::new(handler));
    }

    /// Returns the handler bound to `method`.
    ///
    /// # Errors
    ///
    /// Returns a method-not-found error when nothing is bound.
    pub fn lookup(&self, method: &str) -> Result<SharedHandler, RpcError> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(method)
            .cloned()
            .ok_or_else(|| RpcError::method_not_found(method))
    }

    /// Returns `true` when `method` is bound.
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(method)
    }

    /// Sorted names of every bound method.
    #[must_use]
    pub fn methods(&self) -> BTreeSet<String> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("methods", &self.methods())
            .finish()
    }
}

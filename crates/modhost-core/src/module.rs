//! The `Module` capability trait and hook subscription types.
//!
//! A module is a set of four optional lifecycle callbacks plus a list of
//! hook subscriptions — a structural interface, not a class hierarchy.
//! Every callback may suspend and may fail; the manager awaits each one at
//! the documented point in the lifecycle and propagates failures to its own
//! caller (hook handlers excepted, see [`HookHandler`]).

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;

/// Context payload delivered to hook handlers, exactly as the caller of
/// `execute_hook` supplied it.
pub type HookContext = serde_json::Value;

/// A handler subscribed to a named hook.
///
/// Handler failures are best-effort by contract: the manager reports them
/// to its observer and keeps dispatching. A handler can therefore never
/// fail `execute_hook` for its peers or for the caller.
#[async_trait]
pub trait HookHandler: Send + Sync {
    async fn handle(&self, context: &HookContext) -> Result<(), BoxError>;
}

/// A named hook subscription declared by a module.
#[derive(Clone)]
pub struct HookBinding {
    /// The hook name this handler answers to.
    pub name: String,
    /// The handler to invoke when the hook fires.
    pub handler: Arc<dyn HookHandler>,
}

impl HookBinding {
    pub fn new(name: impl Into<String>, handler: Arc<dyn HookHandler>) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl std::fmt::Debug for HookBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Lifecycle callbacks for a module.
///
/// All four callbacks default to no-ops so a metadata-only module can be
/// registered with an empty impl block. Implementations must be `Send +
/// Sync`: the manager holds them behind `Arc` and test runtimes are free
/// to be multi-threaded.
#[async_trait]
pub trait Module: Send + Sync {
    /// Invoked once by `register`, before the module enters the registry.
    /// Failure aborts registration; the registry is left unchanged.
    async fn install(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Invoked once by `unregister`, before the module leaves the
    /// registry.
    async fn uninstall(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Invoked by `activate` after every dependency in the resolved chain
    /// has finished activating.
    async fn activate(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Invoked by `deactivate` after the dependent check has passed.
    async fn deactivate(&self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Hook subscriptions this module contributes while active.
    fn hooks(&self) -> Vec<HookBinding> {
        Vec::new()
    }
}

/// A module with no callbacks and no hook subscriptions. Useful for
/// metadata-only registrations and as a test stand-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertModule;

#[async_trait]
impl Module for InertModule {}

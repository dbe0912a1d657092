//! Hook failure observation.
//!
//! Hook handlers are best-effort: a failing handler must not disturb its
//! peers or the caller of `execute_hook`. Failures still have to go
//! somewhere, so the manager reports each one to an injected observer
//! instead of discarding it. The default observer logs at `warn` level.

use tracing::warn;

use crate::error::BoxError;

/// Receives hook handler failures that the manager swallows.
pub trait HookErrorObserver: Send + Sync {
    /// Called once per failed handler invocation.
    fn hook_failed(&self, module_id: &str, hook: &str, error: &BoxError);
}

/// Default observer: reports failures through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHookObserver;

impl HookErrorObserver for TracingHookObserver {
    fn hook_failed(&self, module_id: &str, hook: &str, error: &BoxError) {
        warn!(module_id, hook, error = %error, "hook handler failed");
    }
}

//! Recording and failing hook handlers, plus a recording observer.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use modhost_core::{BoxError, HookContext, HookErrorObserver, HookHandler};

/// Hook handler that records every context it receives.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    received: Mutex<Vec<HookContext>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Contexts received so far, in invocation order.
    pub fn received(&self) -> Vec<HookContext> {
        self.received.lock().unwrap().clone()
    }

    /// Number of invocations so far.
    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl HookHandler for RecordingHandler {
    async fn handle(&self, context: &HookContext) -> Result<(), BoxError> {
        self.received.lock().unwrap().push(context.clone());
        Ok(())
    }
}

/// Hook handler that fails every invocation but still counts them.
#[derive(Debug, Default)]
pub struct FailingHandler {
    calls: Mutex<usize>,
}

impl FailingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl HookHandler for FailingHandler {
    async fn handle(&self, _context: &HookContext) -> Result<(), BoxError> {
        *self.calls.lock().unwrap() += 1;
        Err("handler scripted to fail".into())
    }
}

/// Observer that records `(module_id, hook, error message)` for every
/// swallowed hook failure.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    failures: Mutex<Vec<(String, String, String)>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failures(&self) -> Vec<(String, String, String)> {
        self.failures.lock().unwrap().clone()
    }
}

impl HookErrorObserver for RecordingObserver {
    fn hook_failed(&self, module_id: &str, hook: &str, error: &BoxError) {
        self.failures.lock().unwrap().push((
            module_id.to_string(),
            hook.to_string(),
            error.to_string(),
        ));
    }
}

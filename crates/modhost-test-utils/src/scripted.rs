//! [`ScriptedModule`]: a module that records its lifecycle invocations.
//!
//! Tests share one [`CallLog`] across several modules to assert on the
//! relative order of callbacks (e.g., a dependency's `activate` must run
//! before its dependent's).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use modhost_core::{BoxError, HookBinding, Module};

/// Shared, ordered record of lifecycle invocations across modules.
///
/// Entries have the form `"<module_id>.<phase>"`, e.g. `"blog.activate"`.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// Snapshot of all entries in invocation order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Position of the first occurrence of `entry`, if any.
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries.lock().unwrap().iter().position(|e| e == entry)
    }

    /// Number of occurrences of `entry`.
    pub fn count(&self, entry: &str) -> usize {
        self.entries.lock().unwrap().iter().filter(|e| *e == entry).count()
    }
}

/// Which lifecycle phase a [`ScriptedModule`] should fail, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPhase {
    Install,
    Uninstall,
    Activate,
    Deactivate,
}

/// A module whose callbacks append to a shared [`CallLog`] and optionally
/// fail one chosen phase.
pub struct ScriptedModule {
    id: String,
    log: CallLog,
    fail: Option<FailPhase>,
    hooks: Vec<HookBinding>,
}

impl ScriptedModule {
    /// A module that records callbacks into `log` under `id` and never
    /// fails.
    pub fn new(id: impl Into<String>, log: CallLog) -> Self {
        Self {
            id: id.into(),
            log,
            fail: None,
            hooks: Vec::new(),
        }
    }

    /// Make the given phase fail with a descriptive error.
    pub fn failing(mut self, phase: FailPhase) -> Self {
        self.fail = Some(phase);
        self
    }

    /// Attach hook subscriptions.
    pub fn with_hooks(mut self, hooks: Vec<HookBinding>) -> Self {
        self.hooks = hooks;
        self
    }

    fn run(&self, phase: &str, fail: FailPhase) -> Result<(), BoxError> {
        self.log.push(format!("{}.{}", self.id, phase));
        if self.fail == Some(fail) {
            return Err(format!("{} scripted to fail {}", self.id, phase).into());
        }
        Ok(())
    }
}

#[async_trait]
impl Module for ScriptedModule {
    async fn install(&self) -> Result<(), BoxError> {
        self.run("install", FailPhase::Install)
    }

    async fn uninstall(&self) -> Result<(), BoxError> {
        self.run("uninstall", FailPhase::Uninstall)
    }

    async fn activate(&self) -> Result<(), BoxError> {
        self.run("activate", FailPhase::Activate)
    }

    async fn deactivate(&self) -> Result<(), BoxError> {
        self.run("deactivate", FailPhase::Deactivate)
    }

    fn hooks(&self) -> Vec<HookBinding> {
        self.hooks.clone()
    }
}

//! Shared test fixtures for the module-host workspace.
//!
//! This crate provides standardised test modules and hook handlers to
//! eliminate duplication across crate test suites. It is a dev-dependency
//! only — never published.
//!
//! # Modules
//!
//! - [`scripted`] — [`ScriptedModule`](scripted::ScriptedModule), a module
//!   that records every lifecycle invocation and can be told to fail a
//!   chosen phase
//! - [`hooks`] — recording and failing hook handlers plus a
//!   [`RecordingObserver`](hooks::RecordingObserver)

pub mod hooks;
pub mod scripted;

use semver::Version;

use modhost_core::ModuleDescriptor;

/// Descriptor with the given id, version `1.0.0`, and the given
/// dependencies; everything else default.
pub fn descriptor(id: &str, dependencies: &[&str]) -> ModuleDescriptor {
    let mut desc = ModuleDescriptor::new(id, Version::new(1, 0, 0));
    desc.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
    desc
}

//! Module lifecycle manager for Module Host.
//!
//! This crate provides the registry of installable, activatable modules,
//! dependency-ordered activation, and aggregation of the extension points
//! (routes, UI components, hooks) contributed by active modules.
//!
//! The registry lives in memory for the lifetime of one process; nothing
//! here persists module state across restarts.

pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod manager;
pub mod module;
pub mod observer;
pub mod registry;

pub use descriptor::{Component, ModuleConfig, ModuleDescriptor, Route};
pub use error::{BoxError, Error, LifecyclePhase, Result};
pub use manager::ModuleManager;
pub use module::{HookBinding, HookContext, HookHandler, InertModule, Module};
pub use observer::{HookErrorObserver, TracingHookObserver};
pub use registry::{ModuleRecord, ModuleRegistry};

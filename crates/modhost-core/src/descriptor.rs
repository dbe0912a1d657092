//! Module descriptor: the metadata half of a registered module.
//!
//! A descriptor carries identity, dependency declarations, activation
//! config, and the module's static extension contributions (routes and UI
//! components). The behavioural half — lifecycle callbacks and hook
//! handlers — lives on the [`Module`](crate::module::Module) trait object
//! registered alongside the descriptor and is never serialized.

use std::collections::HashMap;

use semver::Version;
use serde::{Deserialize, Serialize};

/// Per-module configuration.
///
/// `enabled` is the authoritative activation flag: it is true exactly when
/// the module's `activate` callback has run more recently than any
/// `deactivate`, or the module was registered pre-enabled. `settings` is an
/// opaque bag the manager stores but never interprets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Whether the module is currently active.
    #[serde(default)]
    pub enabled: bool,
    /// Module-specific settings, opaque to the manager.
    #[serde(default, flatten)]
    pub settings: HashMap<String, serde_json::Value>,
}

impl ModuleConfig {
    /// Config for a module that should start enabled.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            settings: HashMap::new(),
        }
    }
}

/// A route contributed by a module, visible only while the module is
/// active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// URL path pattern (e.g., `/blog/:slug`).
    pub path: String,
    /// HTTP method the route answers to.
    #[serde(default = "default_method")]
    pub method: String,
    /// Identifier the host uses to look up the handler.
    pub handler_id: String,
}

fn default_method() -> String {
    "GET".to_string()
}

/// A UI component contributed by a module, visible only while the module
/// is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Named slot in the host UI this component renders into.
    pub slot: String,
    /// Identifier the host uses to look up the component.
    pub component_id: String,
}

/// The unit of registration: everything the manager knows about a module
/// besides its callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Unique identity, stable for the process lifetime. Used as the
    /// dependency graph node key.
    pub id: String,
    /// Human-readable name. No semantic effect.
    pub name: String,
    /// Module version. No semantic effect on lifecycle behaviour.
    pub version: Version,
    /// Human-readable description. No semantic effect.
    #[serde(default)]
    pub description: String,
    /// Ids of modules that must be *present* (not necessarily active)
    /// before this module may be activated, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Activation flag plus opaque settings.
    #[serde(default)]
    pub config: ModuleConfig,
    /// Routes this module contributes while active.
    #[serde(default)]
    pub routes: Vec<Route>,
    /// UI components this module contributes while active.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl ModuleDescriptor {
    /// Create a descriptor with the given id and version and everything
    /// else empty or default.
    pub fn new(id: impl Into<String>, version: Version) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            version,
            description: String::new(),
            dependencies: Vec::new(),
            config: ModuleConfig::default(),
            routes: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Whether this module is currently active.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Whether this module declares `id` as a direct dependency.
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }
}

//! In-memory module registry.
//!
//! Maps module ids to their records and remembers registration order,
//! which is the iteration order every listing operation exposes. The
//! registry is a plain value owned by one [`ModuleManager`] — no global
//! state, so independent managers (one per test, say) can coexist.
//!
//! [`ModuleManager`]: crate::manager::ModuleManager

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::ModuleDescriptor;
use crate::module::Module;

/// A registered module: its descriptor plus its behaviour.
#[derive(Clone)]
pub struct ModuleRecord {
    /// Metadata, dependency declarations, and extension contributions.
    pub descriptor: ModuleDescriptor,
    /// Lifecycle callbacks and hook subscriptions.
    pub module: Arc<dyn Module>,
}

impl std::fmt::Debug for ModuleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRecord")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registry of currently registered modules.
///
/// Invariant: an id is present exactly when its module has been installed
/// and not yet uninstalled. The manager maintains this by inserting only
/// after a successful `install` and removing only after `uninstall`.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    entries: HashMap<String, ModuleRecord>,
    /// Ids in registration order; parallel to `entries`.
    order: Vec<String>,
}

impl ModuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Returns `false` (and leaves the registry
    /// unchanged) if the id is already present.
    pub fn insert(&mut self, record: ModuleRecord) -> bool {
        let id = record.descriptor.id.clone();
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id.clone(), record);
        self.order.push(id);
        true
    }

    /// Remove a record by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<ModuleRecord> {
        let record = self.entries.remove(id)?;
        self.order.retain(|entry| entry != id);
        Some(record)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&ModuleRecord> {
        self.entries.get(id)
    }

    /// Look up a record mutably by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ModuleRecord> {
        self.entries.get_mut(id)
    }

    /// Check if an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Ids of registered modules that declare `id` as a direct
    /// dependency, in registration order.
    pub fn dependents_of(&self, id: &str) -> Vec<String> {
        self.iter()
            .filter(|record| record.descriptor.depends_on(id))
            .map(|record| record.descriptor.id.clone())
            .collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

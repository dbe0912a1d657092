//! The module manager: registration, activation, and extension
//! aggregation over one in-memory registry.
//!
//! One `ModuleManager` value owns one registry. Mutating operations take
//! `&mut self`, so the check-then-mutate sequences inside them cannot
//! interleave; hosts that share a manager across tasks wrap it in their
//! own lock. Lifecycle callbacks and hook handlers are awaited inline —
//! they are the only suspension points.

use std::sync::Arc;

use tracing::{debug, info};

use crate::dependency;
use crate::descriptor::{Component, ModuleConfig, ModuleDescriptor, Route};
use crate::error::{Error, LifecyclePhase, Result};
use crate::module::{HookContext, Module};
use crate::observer::{HookErrorObserver, TracingHookObserver};
use crate::registry::{ModuleRecord, ModuleRegistry};

/// Tracks registered modules, drives their lifecycle in dependency order,
/// and aggregates extension contributions from active modules.
pub struct ModuleManager {
    registry: ModuleRegistry,
    observer: Arc<dyn HookErrorObserver>,
}

impl Default for ModuleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleManager {
    /// Create a manager with an empty registry and the tracing-backed
    /// hook observer.
    pub fn new() -> Self {
        Self {
            registry: ModuleRegistry::new(),
            observer: Arc::new(TracingHookObserver),
        }
    }

    /// Create a manager that reports hook handler failures to `observer`.
    pub fn with_observer(observer: Arc<dyn HookErrorObserver>) -> Self {
        Self {
            registry: ModuleRegistry::new(),
            observer,
        }
    }

    /// Register a module: run its `install` callback, then add it to the
    /// registry.
    ///
    /// Installation is atomic with registration: if `install` fails, the
    /// module is not added and the registry is unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateModule`] if the id is already registered (no
    /// callback runs); [`Error::Lifecycle`] if `install` fails.
    pub async fn register(
        &mut self,
        descriptor: ModuleDescriptor,
        module: Arc<dyn Module>,
    ) -> Result<()> {
        let id = descriptor.id.clone();
        if self.registry.contains(&id) {
            return Err(Error::DuplicateModule { id });
        }

        module.install().await.map_err(|source| Error::Lifecycle {
            id: id.clone(),
            phase: LifecyclePhase::Install,
            source,
        })?;

        self.registry.insert(ModuleRecord { descriptor, module });
        info!(module_id = %id, "module registered");
        Ok(())
    }

    /// Unregister a module: run its `uninstall` callback, then remove it
    /// from the registry.
    ///
    /// # Errors
    ///
    /// [`Error::NotRegistered`] if the id is absent;
    /// [`Error::DependentModulesExist`] if any registered module, active
    /// or not, depends on it — an inactive dependent could be activated
    /// later and would then require the missing module;
    /// [`Error::Lifecycle`] if `uninstall` fails (the module stays
    /// registered).
    pub async fn unregister(&mut self, id: &str) -> Result<()> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| Error::NotRegistered { id: id.to_string() })?;

        let dependents = self.registry.dependents_of(id);
        if !dependents.is_empty() {
            return Err(Error::DependentModulesExist {
                id: id.to_string(),
                dependents,
            });
        }

        let module = Arc::clone(&record.module);
        module.uninstall().await.map_err(|source| Error::Lifecycle {
            id: id.to_string(),
            phase: LifecyclePhase::Uninstall,
            source,
        })?;

        self.registry.remove(id);
        info!(module_id = id, "module unregistered");
        Ok(())
    }

    /// Compute the activation order for `id`: its transitive dependency
    /// closure in topological order, ending with `id`. Pure; see
    /// [`dependency::resolve`].
    pub fn resolve_dependencies(&self, id: &str) -> Result<Vec<String>> {
        dependency::resolve(&self.registry, id)
    }

    /// Activate `id` and every inactive module in its dependency chain,
    /// dependencies first.
    ///
    /// Already-active modules in the chain are skipped, so re-activating
    /// an active module is a no-op and `activate` callbacks never run
    /// twice without an intervening deactivation.
    ///
    /// A callback failure mid-chain aborts the remainder and propagates;
    /// modules activated earlier in the same call stay active. The
    /// failing module itself is left disabled.
    ///
    /// # Errors
    ///
    /// [`Error::NotRegistered`], any resolution error from
    /// [`dependency::resolve`], or [`Error::Lifecycle`] from a failing
    /// `activate` callback.
    pub async fn activate(&mut self, id: &str) -> Result<()> {
        let chain = self.resolve_dependencies(id)?;

        for step in &chain {
            let record = self
                .registry
                .get_mut(step)
                .ok_or_else(|| Error::NotRegistered { id: step.clone() })?;
            if record.descriptor.config.enabled {
                continue;
            }

            record.descriptor.config.enabled = true;
            let module = Arc::clone(&record.module);
            if let Err(source) = module.activate().await {
                // The flag must not claim a module whose callback never
                // completed.
                if let Some(record) = self.registry.get_mut(step) {
                    record.descriptor.config.enabled = false;
                }
                return Err(Error::Lifecycle {
                    id: step.clone(),
                    phase: LifecyclePhase::Activate,
                    source,
                });
            }
            debug!(module_id = %step, "module activated");
        }

        info!(module_id = id, chain_len = chain.len(), "activation complete");
        Ok(())
    }

    /// Deactivate `id`: clear its enabled flag and run its `deactivate`
    /// callback. Dependencies of `id` are left active.
    ///
    /// # Errors
    ///
    /// [`Error::NotRegistered`] if absent;
    /// [`Error::ActiveDependentsExist`] if a currently active module
    /// depends on `id` (inactive dependents do not block);
    /// [`Error::Lifecycle`] if the callback fails.
    pub async fn deactivate(&mut self, id: &str) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(Error::NotRegistered { id: id.to_string() });
        }

        let active_dependents: Vec<String> = self
            .registry
            .dependents_of(id)
            .into_iter()
            .filter(|dep| {
                self.registry
                    .get(dep)
                    .is_some_and(|r| r.descriptor.config.enabled)
            })
            .collect();
        if !active_dependents.is_empty() {
            return Err(Error::ActiveDependentsExist {
                id: id.to_string(),
                dependents: active_dependents,
            });
        }

        let record = self
            .registry
            .get_mut(id)
            .ok_or_else(|| Error::NotRegistered { id: id.to_string() })?;
        record.descriptor.config.enabled = false;
        let module = Arc::clone(&record.module);
        module.deactivate().await.map_err(|source| Error::Lifecycle {
            id: id.to_string(),
            phase: LifecyclePhase::Deactivate,
            source,
        })?;

        info!(module_id = id, "module deactivated");
        Ok(())
    }

    /// Replace a module's config wholesale. No merge, and no lifecycle
    /// callbacks run even if `enabled` flips — config replacement is a
    /// distinct operation from the activation state machine.
    ///
    /// # Errors
    ///
    /// [`Error::NotRegistered`] if the id is absent.
    pub fn update_config(&mut self, id: &str, config: ModuleConfig) -> Result<()> {
        let record = self
            .registry
            .get_mut(id)
            .ok_or_else(|| Error::NotRegistered { id: id.to_string() })?;
        record.descriptor.config = config;
        debug!(module_id = id, "module config replaced");
        Ok(())
    }

    /// Look up a module's descriptor. Never fails.
    pub fn module(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.registry.get(id).map(|record| &record.descriptor)
    }

    /// All registered descriptors, in registration order.
    pub fn all_modules(&self) -> Vec<&ModuleDescriptor> {
        self.registry.iter().map(|record| &record.descriptor).collect()
    }

    /// Registered descriptors with `config.enabled == true`, in
    /// registration order.
    pub fn active_modules(&self) -> Vec<&ModuleDescriptor> {
        self.registry
            .iter()
            .map(|record| &record.descriptor)
            .filter(|descriptor| descriptor.is_enabled())
            .collect()
    }

    /// Routes contributed by active modules: per-module declared order,
    /// modules in registration order. Inactive modules contribute
    /// nothing.
    pub fn routes(&self) -> Vec<Route> {
        self.active_modules()
            .into_iter()
            .flat_map(|descriptor| descriptor.routes.iter().cloned())
            .collect()
    }

    /// UI components contributed by active modules, same ordering rules
    /// as [`routes`](Self::routes).
    pub fn components(&self) -> Vec<Component> {
        self.active_modules()
            .into_iter()
            .flat_map(|descriptor| descriptor.components.iter().cloned())
            .collect()
    }

    /// Fire the named hook on every active module, sequentially in
    /// registration order, passing `context` to each matching handler.
    ///
    /// Handler failures are isolated: each is reported to the observer
    /// and dispatch continues. This operation itself never fails —
    /// lifecycle transitions are strict, hooks are best-effort
    /// notifications.
    pub async fn execute_hook(&self, name: &str, context: &HookContext) {
        // Snapshot the matching handlers first: a handler may suspend,
        // and the borrow must not outlive into the await.
        let handlers: Vec<(String, Arc<dyn crate::module::HookHandler>)> = self
            .registry
            .iter()
            .filter(|record| record.descriptor.is_enabled())
            .flat_map(|record| {
                let id = record.descriptor.id.clone();
                record
                    .module
                    .hooks()
                    .into_iter()
                    .filter(|binding| binding.name == name)
                    .map(move |binding| (id.clone(), binding.handler))
            })
            .collect();

        debug!(hook = name, handlers = handlers.len(), "dispatching hook");
        for (module_id, handler) in handlers {
            if let Err(error) = handler.handle(context).await {
                self.observer.hook_failed(&module_id, name, &error);
            }
        }
    }
}


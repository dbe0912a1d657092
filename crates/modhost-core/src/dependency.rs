//! Dependency resolution over the module registry.
//!
//! Resolution is a depth-first traversal of the `dependencies` relation
//! starting at one requested module. It returns a topological order ending
//! with the requested id: every id appears after all of its transitive
//! dependencies, and each id appears exactly once.
//!
//! Cycle detection uses a "visiting" set distinct from the "resolved"
//! set. Revisiting a node that is still on the recursion stack is a cycle;
//! revisiting a node that is already fully resolved is a diamond (a shared
//! transitive dependency reached via two paths) and resolves once.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::registry::ModuleRegistry;

/// Resolve the activation order for `id`: a topological ordering of its
/// transitive dependency closure, ending with `id` itself.
///
/// Pure with respect to the registry: no side effects, no mutation.
///
/// # Errors
///
/// - [`Error::NotRegistered`] if `id` itself is absent.
/// - [`Error::MissingDependency`] if the traversal reaches an id absent
///   from the registry, naming that id and the module that required it.
/// - [`Error::CircularDependency`] if a module transitively depends on
///   itself.
pub fn resolve(registry: &ModuleRegistry, id: &str) -> Result<Vec<String>> {
    if !registry.contains(id) {
        return Err(Error::NotRegistered { id: id.to_string() });
    }

    let mut visiting = HashSet::new();
    let mut resolved = HashSet::new();
    let mut order = Vec::new();
    visit(registry, id, &mut visiting, &mut resolved, &mut order)?;
    Ok(order)
}

fn visit(
    registry: &ModuleRegistry,
    id: &str,
    visiting: &mut HashSet<String>,
    resolved: &mut HashSet<String>,
    order: &mut Vec<String>,
) -> Result<()> {
    if resolved.contains(id) {
        return Ok(());
    }
    if !visiting.insert(id.to_string()) {
        return Err(Error::CircularDependency { id: id.to_string() });
    }

    let record = registry
        .get(id)
        .ok_or_else(|| Error::NotRegistered { id: id.to_string() })?;

    for dep in &record.descriptor.dependencies {
        if !registry.contains(dep) {
            return Err(Error::MissingDependency {
                id: dep.clone(),
                required_by: id.to_string(),
            });
        }
        visit(registry, dep, visiting, resolved, order)?;
    }

    // Post-order: a module is appended only after all its dependencies.
    visiting.remove(id);
    resolved.insert(id.to_string());
    order.push(id.to_string());
    Ok(())
}

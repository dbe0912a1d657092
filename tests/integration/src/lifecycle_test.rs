//! End-to-end lifecycle test: a small application assembled from modules.
//!
//! Exercises the complete flow — register, dependency-ordered activation,
//! config replacement, deactivation with dependent checks, unregistration —
//! against one manager, the way a host process would drive it.

use std::sync::Arc;

use modhost_core::{Error, ModuleConfig, ModuleManager};
use modhost_test_utils::descriptor;
use modhost_test_utils::scripted::{CallLog, FailPhase, ScriptedModule};
use pretty_assertions::assert_eq;

/// Build the fixture application: database <- auth <- blog, plus a
/// standalone theme module.
async fn setup() -> (ModuleManager, CallLog) {
    // RUST_LOG=debug surfaces manager transitions when a test fails
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let log = CallLog::new();
    let mut manager = ModuleManager::new();
    for (id, deps) in [
        ("database", vec![]),
        ("auth", vec!["database"]),
        ("blog", vec!["auth"]),
        ("theme", vec![]),
    ] {
        manager
            .register(
                descriptor(id, &deps),
                Arc::new(ScriptedModule::new(id, log.clone())),
            )
            .await
            .unwrap();
    }
    (manager, log)
}

#[tokio::test]
async fn test_full_module_lifecycle() {
    let (mut manager, log) = setup().await;

    // Everything registered, nothing active
    assert_eq!(manager.all_modules().len(), 4);
    assert!(manager.active_modules().is_empty());

    // Activating the leaf pulls in the whole chain, dependencies first
    manager.activate("blog").await.unwrap();
    assert_eq!(
        log.entries()
            .iter()
            .filter(|e| e.ends_with(".activate"))
            .cloned()
            .collect::<Vec<_>>(),
        vec!["database.activate", "auth.activate", "blog.activate"]
    );
    assert_eq!(manager.active_modules().len(), 3);

    // The chain protects its members while a dependent is active
    assert!(matches!(
        manager.deactivate("database").await.unwrap_err(),
        Error::ActiveDependentsExist { .. }
    ));
    assert!(matches!(
        manager.unregister("auth").await.unwrap_err(),
        Error::DependentModulesExist { .. }
    ));

    // Tear down top-down
    manager.deactivate("blog").await.unwrap();
    manager.deactivate("auth").await.unwrap();
    manager.deactivate("database").await.unwrap();
    assert!(manager.active_modules().is_empty());

    manager.unregister("blog").await.unwrap();
    manager.unregister("auth").await.unwrap();
    manager.unregister("database").await.unwrap();
    manager.unregister("theme").await.unwrap();
    assert!(manager.all_modules().is_empty());

    // Each callback ran exactly once per module
    for id in ["database", "auth", "blog"] {
        assert_eq!(log.count(&format!("{id}.install")), 1);
        assert_eq!(log.count(&format!("{id}.activate")), 1);
        assert_eq!(log.count(&format!("{id}.deactivate")), 1);
        assert_eq!(log.count(&format!("{id}.uninstall")), 1);
    }
}

#[tokio::test]
async fn test_resolution_errors_surface_to_the_host() {
    let (mut manager, _log) = setup().await;

    // A module whose dependency was never registered
    manager
        .register(
            descriptor("search", &["indexer"]),
            Arc::new(ScriptedModule::new("search", CallLog::new())),
        )
        .await
        .unwrap();
    match manager.activate("search").await.unwrap_err() {
        Error::MissingDependency { id, required_by } => {
            assert_eq!(id, "indexer");
            assert_eq!(required_by, "search");
        }
        other => panic!("expected MissingDependency, got {other:?}"),
    }

    // resolve_dependencies is exposed directly and is pure
    assert_eq!(
        manager.resolve_dependencies("blog").unwrap(),
        vec!["database", "auth", "blog"]
    );
    assert!(manager.active_modules().is_empty());
}

#[tokio::test]
async fn test_partial_activation_is_recoverable() {
    let log = CallLog::new();
    let mut manager = ModuleManager::new();
    manager
        .register(
            descriptor("database", &[]),
            Arc::new(ScriptedModule::new("database", log.clone())),
        )
        .await
        .unwrap();
    manager
        .register(
            descriptor("cache", &["database"]),
            Arc::new(ScriptedModule::new("cache", log.clone()).failing(FailPhase::Activate)),
        )
        .await
        .unwrap();

    // Mid-chain failure: database stays active, cache does not
    assert!(manager.activate("cache").await.is_err());
    assert!(manager.module("database").unwrap().is_enabled());
    assert!(!manager.module("cache").unwrap().is_enabled());

    // The host can retry; the already-active dependency is skipped
    assert!(manager.activate("cache").await.is_err());
    assert_eq!(log.count("database.activate"), 1);
    assert_eq!(log.count("cache.activate"), 2);
}

#[tokio::test]
async fn test_config_replacement_is_independent_of_activation() {
    let (mut manager, log) = setup().await;
    manager.activate("theme").await.unwrap();

    // Disabling via config does not run deactivate
    manager
        .update_config("theme", ModuleConfig::default())
        .unwrap();
    assert!(!manager.module("theme").unwrap().is_enabled());
    assert_eq!(log.count("theme.deactivate"), 0);

    // And the module no longer counts as active
    assert!(manager.active_modules().is_empty());
}

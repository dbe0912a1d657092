//! End-to-end extension aggregation test: routes, components, and hook
//! fan-out across several modules as they activate and deactivate.

use std::sync::Arc;

use modhost_core::{Component, HookBinding, ModuleManager, Route};
use modhost_test_utils::descriptor;
use modhost_test_utils::hooks::{FailingHandler, RecordingHandler, RecordingObserver};
use modhost_test_utils::scripted::{CallLog, ScriptedModule};
use pretty_assertions::assert_eq;
use serde_json::json;

fn route(path: &str, handler_id: &str) -> Route {
    Route {
        path: path.to_string(),
        method: "GET".to_string(),
        handler_id: handler_id.to_string(),
    }
}

fn component(slot: &str, component_id: &str) -> Component {
    Component {
        slot: slot.to_string(),
        component_id: component_id.to_string(),
    }
}

#[tokio::test]
async fn test_extension_surfaces_track_activation_state() {
    let log = CallLog::new();
    let mut manager = ModuleManager::new();

    let mut blog = descriptor("blog", &[]);
    blog.routes = vec![route("/blog", "blog.index"), route("/blog/:slug", "blog.post")];
    blog.components = vec![component("sidebar", "blog.recent")];

    let mut shop = descriptor("shop", &[]);
    shop.routes = vec![route("/shop", "shop.index")];
    shop.components = vec![component("header", "shop.cart")];

    manager
        .register(blog, Arc::new(ScriptedModule::new("blog", log.clone())))
        .await
        .unwrap();
    manager
        .register(shop, Arc::new(ScriptedModule::new("shop", log.clone())))
        .await
        .unwrap();

    // Nothing active, nothing visible
    assert!(manager.routes().is_empty());
    assert!(manager.components().is_empty());

    manager.activate("blog").await.unwrap();
    manager.activate("shop").await.unwrap();

    // Registration order across modules, declared order within one
    let paths: Vec<String> = manager.routes().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/blog", "/blog/:slug", "/shop"]);
    let slots: Vec<String> = manager.components().into_iter().map(|c| c.slot).collect();
    assert_eq!(slots, vec!["sidebar", "header"]);

    // Deactivation withdraws contributions immediately
    manager.deactivate("blog").await.unwrap();
    let paths: Vec<String> = manager.routes().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["/shop"]);
}

#[tokio::test]
async fn test_hook_fan_out_across_modules_with_failure_isolation() {
    let log = CallLog::new();
    let observer = RecordingObserver::new();
    let mut manager = ModuleManager::with_observer(observer.clone());

    let audit = RecordingHandler::new();
    let notify = RecordingHandler::new();
    let broken = FailingHandler::new();

    manager
        .register(
            descriptor("audit", &[]),
            Arc::new(
                ScriptedModule::new("audit", log.clone())
                    .with_hooks(vec![HookBinding::new("post.published", audit.clone())]),
            ),
        )
        .await
        .unwrap();
    manager
        .register(
            descriptor("mailer", &[]),
            Arc::new(
                ScriptedModule::new("mailer", log.clone())
                    .with_hooks(vec![HookBinding::new("post.published", broken.clone())]),
            ),
        )
        .await
        .unwrap();
    manager
        .register(
            descriptor("notifier", &[]),
            Arc::new(
                ScriptedModule::new("notifier", log.clone())
                    .with_hooks(vec![HookBinding::new("post.published", notify.clone())]),
            ),
        )
        .await
        .unwrap();

    for id in ["audit", "mailer", "notifier"] {
        manager.activate(id).await.unwrap();
    }

    let ctx = json!({ "post_id": 42, "title": "Hello" });
    manager.execute_hook("post.published", &ctx).await;

    // The failing handler in the middle stops nothing
    assert_eq!(audit.received(), vec![ctx.clone()]);
    assert_eq!(broken.call_count(), 1);
    assert_eq!(notify.received(), vec![ctx.clone()]);

    // The failure was reported, not lost
    let failures = observer.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "mailer");
    assert_eq!(failures[0].1, "post.published");

    // A second dispatch reaches everyone again
    manager.execute_hook("post.published", &ctx).await;
    assert_eq!(audit.call_count(), 2);
    assert_eq!(notify.call_count(), 2);

    // Deactivated modules drop out of the fan-out
    manager.deactivate("notifier").await.unwrap();
    manager.execute_hook("post.published", &ctx).await;
    assert_eq!(audit.call_count(), 3);
    assert_eq!(notify.call_count(), 2);
}

//! Node resolution tests
//!
//! A clicked node id is looked up across the related groups in a fixed
//! priority order; the first match decides where the panel navigates.

use nsview::graph::{GraphBuilder, NodeIdentity, Palette, resolve_node};
use nsview::models::{DebugPayload, ResourceKind, ResourceTarget};
use serde_json::json;

fn payload(value: serde_json::Value) -> DebugPayload {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_configmap_wins_over_secret_with_same_name() {
    let payload = payload(json!({
        "type": "service",
        "name": "svc1",
        "related": {
            "ConfigMaps": [{ "name": "x", "keys": ["a"] }],
            "Secrets": [{ "name": "x", "keys": ["b"] }]
        }
    }));

    let resolved = resolve_node("x", &payload).unwrap();

    assert_eq!(resolved.kind, ResourceKind::ConfigMap);
    assert_eq!(resolved.resource.attributes["keys"].display(), "a");
}

#[test]
fn test_priority_order_across_groups() {
    let payload = payload(json!({
        "type": "service",
        "name": "svc1",
        "related": {
            "Secrets": [{ "name": "shared" }],
            "ConfigMaps": [{ "name": "shared" }],
            "Services": [{ "name": "shared" }],
            "Ingresses": [{ "name": "shared" }],
            "Pods": [{ "name": "shared" }]
        }
    }));
    assert_eq!(resolve_node("shared", &payload).unwrap().kind, ResourceKind::Pod);

    let payload = payload_without_pods();
    assert_eq!(resolve_node("shared", &payload).unwrap().kind, ResourceKind::Ingress);
}

fn payload_without_pods() -> DebugPayload {
    payload(json!({
        "type": "service",
        "name": "svc1",
        "related": {
            "Services": [{ "name": "shared" }],
            "Ingresses": [{ "name": "shared" }]
        }
    }))
}

#[test]
fn test_legacy_entries_resolve_as_services() {
    let payload = payload(json!({
        "type": "service",
        "name": "svc1",
        "related": { "ConfigMaps": [{ "name": "db" }] },
        "graph": {
            "dependents": [{ "name": "frontend" }],
            "connections": [{ "name": "db" }]
        }
    }));

    let frontend = resolve_node("frontend", &payload).unwrap();
    assert_eq!(frontend.target(), ResourceTarget::new(ResourceKind::Service, "frontend"));

    // the services bucket (including legacy sections) comes before configmaps
    assert_eq!(resolve_node("db", &payload).unwrap().kind, ResourceKind::Service);
}

#[test]
fn test_related_services_come_before_legacy_sections() {
    let payload = payload(json!({
        "type": "service",
        "name": "svc1",
        "related": { "Services": [{ "name": "db", "status": "related" }] },
        "graph": { "dependencies": [{ "name": "db", "status": "legacy" }] }
    }));

    let resolved = resolve_node("db", &payload).unwrap();
    assert_eq!(resolved.resource.status(), Some("related"));
}

#[test]
fn test_unknown_and_focal_ids_do_not_resolve() {
    let payload = payload(json!({
        "type": "service",
        "name": "svc1",
        "related": { "Pods": [{ "name": "pod1" }] }
    }));

    assert!(resolve_node("nope", &payload).is_none());
    assert!(resolve_node("svc1", &payload).is_none());
}

#[test]
fn test_kind_qualified_ids_round_trip_through_the_builder() {
    let payload = payload(json!({
        "type": "service",
        "name": "app",
        "related": {
            "ConfigMaps": [{ "name": "app" }],
            "Secrets": [{ "name": "app" }]
        }
    }));

    let graph = GraphBuilder::new(Palette::default(), NodeIdentity::KindQualified).build(&payload);

    let secret = resolve_node("secret/app", &payload).unwrap();
    assert_eq!(secret.kind, ResourceKind::Secret);
    assert!(graph.contains_node("secret/app"));

    // every non-focal node id resolves back to a record of its own kind
    for node in graph.nodes().iter().filter(|n| n.id != "service/app") {
        let resolved = resolve_node(&node.id, &payload).unwrap();
        assert_eq!(resolved.kind, node.kind);
    }
}

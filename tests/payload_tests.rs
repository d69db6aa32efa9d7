//! Debug payload parsing tests
//!
//! Payloads come straight from the backend and are only loosely shaped, so
//! parsing has to tolerate nulls, unknown groups and mixed attribute types.

use nsview::api::{DebugSource, FileDebugSource, read_payload};
use nsview::models::{
    AttributeValue, DebugPayload, EventRecord, Health, PodDetails, PodHealth, RelationGroup,
    ResourceKind, ResourceRef, ResourceTarget,
};
use serde_json::json;

const SERVICE_PAYLOAD: &str = r#"{
  "type": "service",
  "name": "checkout",
  "details": {
    "type": "ClusterIP",
    "clusterIP": "10.0.0.12",
    "ports": ["80/TCP", "443/TCP"],
    "selector": { "app": "checkout" }
  },
  "events": [
    { "type": "Warning", "reason": "Unhealthy", "message": "probe failed", "count": 4 }
  ],
  "related": {
    "Pods": [
      { "name": "checkout-7d9f", "status": "Running", "ready": true, "restarts": 0 }
    ],
    "Ingresses": [{ "name": "shop", "hosts": ["shop.example.com"] }],
    "ConfigMaps": null,
    "Deployments": [{ "name": "checkout" }]
  },
  "graph": {
    "dependencies": [{ "name": "payments" }]
  }
}"#;

#[test]
fn test_full_service_payload() {
    let payload: DebugPayload = serde_json::from_str(SERVICE_PAYLOAD).unwrap();

    assert_eq!(payload.focal_kind(), Some(ResourceKind::Service));
    assert_eq!(payload.related.pods.len(), 1);
    assert_eq!(payload.related.ingresses.len(), 1);
    assert!(payload.related.config_maps.is_empty());
    assert!(payload.related.other.contains_key("Deployments"));
    assert_eq!(payload.graph.as_ref().unwrap().dependencies[0].name, "payments");

    let pod = &payload.related.pods[0];
    assert_eq!(pod.status(), Some("Running"));
    assert_eq!(pod.attributes["ready"], AttributeValue::Bool(true));

    let ingress = &payload.related.group(RelationGroup::Ingresses)[0];
    assert_eq!(ingress.attributes["hosts"].display(), "shop.example.com");

    let event = &payload.events[0];
    assert!(!event.is_normal());
    assert_eq!(event.count, Some(4));
}

#[test]
fn test_detail_rows_skip_identity_fields() {
    let payload: DebugPayload = serde_json::from_str(SERVICE_PAYLOAD).unwrap();

    let rows = payload.detail_rows();
    let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();

    assert_eq!(keys, vec!["clusterIP", "ports", "selector"]);
    assert_eq!(rows[1].1, "80/TCP, 443/TCP");
    assert_eq!(rows[2].1, r#"{"app":"checkout"}"#);
}

#[test]
fn test_non_empty_groups_follow_label_order() {
    let payload: DebugPayload = serde_json::from_str(SERVICE_PAYLOAD).unwrap();

    let groups: Vec<&str> = payload
        .related
        .non_empty_groups()
        .map(|(group, _)| group.label())
        .collect();

    assert_eq!(groups, vec!["Pods", "Ingresses"]);
}

#[test]
fn test_minimal_payload() {
    let payload: DebugPayload =
        serde_json::from_value(json!({ "type": "secret", "name": "tls" })).unwrap();

    assert_eq!(payload.focal_kind(), Some(ResourceKind::Secret));
    assert!(payload.related.is_empty());
    assert!(payload.events.is_empty());
    assert!(payload.graph.is_none());
}

#[test]
fn test_payload_serializes_with_backend_keys() {
    let mut payload = DebugPayload::new("pod", "p1");
    payload
        .related
        .group_mut(RelationGroup::ConfigMaps)
        .push(ResourceRef::new("cm1").with_attribute("keys", vec!["a".to_string()]));

    insta::assert_json_snapshot!(payload, @r#"
    {
      "type": "pod",
      "name": "p1",
      "details": {},
      "events": [],
      "related": {
        "ConfigMaps": [
          {
            "name": "cm1",
            "keys": [
              "a"
            ]
          }
        ]
      }
    }
    "#);
}

#[test]
fn test_record_parsing() {
    let health: Vec<PodHealth> = serde_json::from_value(json!([
        { "name": "web-1", "status": "Running", "health": "healthy", "cpu": "10m",
          "memory": "64Mi", "restarts": 1, "age": "2h" },
        { "name": "web-2", "status": "Pending", "health": "degraded" }
    ]))
    .unwrap();
    assert_eq!(health[0].health, Health::Healthy);
    assert_eq!(health[1].health, Health::Unknown);

    let events: Vec<EventRecord> = serde_json::from_value(json!([
        { "type": "Warning", "reason": "BackOff", "object": "Pod/web-1",
          "message": "Back-off restarting", "count": 3, "last_seen": "5m" }
    ]))
    .unwrap();
    assert!(events[0].is_warning());
}

#[test]
fn test_pod_details_defaults() {
    let pod: PodDetails = serde_json::from_value(json!({
        "name": "web-1",
        "namespace": "shop"
    }))
    .unwrap();

    assert_eq!(pod.resources.cpu.request, "N/A");
    assert!(pod.containers.is_empty());
}

#[tokio::test]
async fn test_file_source_directory_layout() {
    let dir = tempfile::tempdir().unwrap();
    let services = dir.path().join("service");
    std::fs::create_dir_all(&services).unwrap();
    std::fs::write(services.join("checkout.json"), SERVICE_PAYLOAD).unwrap();

    let source = FileDebugSource::new(dir.path());
    let payload = source
        .fetch_debug("shop", &ResourceTarget::new(ResourceKind::Service, "checkout"))
        .await
        .unwrap();
    assert_eq!(payload.name, "checkout");

    let missing = source
        .fetch_debug("shop", &ResourceTarget::new(ResourceKind::Pod, "checkout"))
        .await
        .unwrap_err();
    assert!(missing.is_not_found());

    let direct = read_payload(&services.join("checkout.json")).await.unwrap();
    assert_eq!(direct, payload);
}

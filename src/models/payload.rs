//! Debug payload models
//!
//! Serde models for the `/api/debug/{type}/{ns}/{name}` response: a focal
//! resource, its events, related resources bucketed by group label, and the
//! optional legacy `graph` section.

use super::resource_kind::ResourceKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Treat an explicit JSON `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Value of a resource attribute
///
/// The backend sends scalars and string lists; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl AttributeValue {
    /// Render the value for a details row (lists are joined with ", ")
    pub fn display(&self) -> String {
        match self {
            AttributeValue::Bool(b) => b.to_string(),
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::Text(s) => s.clone(),
            AttributeValue::List(items) => items.join(", "),
            AttributeValue::Other(serde_json::Value::Null) => String::new(),
            AttributeValue::Other(v) => v.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(items: Vec<String>) -> Self {
        AttributeValue::List(items)
    }
}

/// A resource referenced from a debug payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub name: String,
    /// Every other field of the entry (status, info, type-specific data)
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Health summary shown next to related resources ("Healthy", "Warning", ...)
    pub fn status(&self) -> Option<&str> {
        self.attributes.get("status").and_then(AttributeValue::as_text)
    }

    /// Free-form one-line description
    pub fn info(&self) -> Option<&str> {
        self.attributes.get("info").and_then(AttributeValue::as_text)
    }
}

/// Related resource group labels recognized in `related`
///
/// Keys are case-sensitive; any other key is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationGroup {
    Pods,
    Ingresses,
    Services,
    ConfigMaps,
    Secrets,
}

impl RelationGroup {
    pub fn label(&self) -> &'static str {
        match self {
            RelationGroup::Pods => "Pods",
            RelationGroup::Ingresses => "Ingresses",
            RelationGroup::Services => "Services",
            RelationGroup::ConfigMaps => "ConfigMaps",
            RelationGroup::Secrets => "Secrets",
        }
    }

    /// Singular kind of every entry in the group
    pub fn kind(&self) -> ResourceKind {
        match self {
            RelationGroup::Pods => ResourceKind::Pod,
            RelationGroup::Ingresses => ResourceKind::Ingress,
            RelationGroup::Services => ResourceKind::Service,
            RelationGroup::ConfigMaps => ResourceKind::ConfigMap,
            RelationGroup::Secrets => ResourceKind::Secret,
        }
    }

    /// Groups in the order the graph builder processes them
    pub fn all() -> &'static [Self] {
        &[
            RelationGroup::Pods,
            RelationGroup::Ingresses,
            RelationGroup::Services,
            RelationGroup::ConfigMaps,
            RelationGroup::Secrets,
        ]
    }
}

/// Related resources bucketed by group label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedResources {
    #[serde(
        rename = "Pods",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pods: Vec<ResourceRef>,
    #[serde(
        rename = "Ingresses",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ingresses: Vec<ResourceRef>,
    #[serde(
        rename = "Services",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub services: Vec<ResourceRef>,
    #[serde(
        rename = "ConfigMaps",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub config_maps: Vec<ResourceRef>,
    #[serde(
        rename = "Secrets",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub secrets: Vec<ResourceRef>,
    /// Groups outside the recognized set, kept only so they survive a round trip
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl RelatedResources {
    pub fn group(&self, group: RelationGroup) -> &[ResourceRef] {
        match group {
            RelationGroup::Pods => &self.pods,
            RelationGroup::Ingresses => &self.ingresses,
            RelationGroup::Services => &self.services,
            RelationGroup::ConfigMaps => &self.config_maps,
            RelationGroup::Secrets => &self.secrets,
        }
    }

    pub fn group_mut(&mut self, group: RelationGroup) -> &mut Vec<ResourceRef> {
        match group {
            RelationGroup::Pods => &mut self.pods,
            RelationGroup::Ingresses => &mut self.ingresses,
            RelationGroup::Services => &mut self.services,
            RelationGroup::ConfigMaps => &mut self.config_maps,
            RelationGroup::Secrets => &mut self.secrets,
        }
    }

    /// Non-empty recognized groups, in processing order
    pub fn non_empty_groups(&self) -> impl Iterator<Item = (RelationGroup, &[ResourceRef])> {
        RelationGroup::all()
            .iter()
            .map(|g| (*g, self.group(*g)))
            .filter(|(_, entries)| !entries.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty_groups().next().is_none()
    }
}

/// Older relationship representation, merged alongside `related`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyGraph {
    #[serde(default, deserialize_with = "nullable")]
    pub dependencies: Vec<ResourceRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub dependents: Vec<ResourceRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub connections: Vec<ResourceRef>,
}

/// An event attached to the focal resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugEvent {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub first_timestamp: Option<String>,
    #[serde(default)]
    pub last_timestamp: Option<String>,
}

impl DebugEvent {
    pub fn is_normal(&self) -> bool {
        self.event_type.as_deref() == Some("Normal")
    }
}

/// Response of the debug endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugPayload {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub details: BTreeMap<String, AttributeValue>,
    #[serde(default, deserialize_with = "nullable")]
    pub events: Vec<DebugEvent>,
    #[serde(default, deserialize_with = "nullable")]
    pub related: RelatedResources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<LegacyGraph>,
}

impl DebugPayload {
    /// Minimal payload with no details, events or relations
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            details: BTreeMap::new(),
            events: Vec::new(),
            related: RelatedResources::default(),
            graph: None,
        }
    }

    /// Kind of the focal resource, None when `type` is outside the known set
    pub fn focal_kind(&self) -> Option<ResourceKind> {
        ResourceKind::from_payload_type(&self.resource_type)
    }

    /// `(key, value)` rows for the details view, skipping `type` and `name`
    pub fn detail_rows(&self) -> Vec<(String, String)> {
        self.details
            .iter()
            .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "name")
            .map(|(key, value)| (key.clone(), value.display()))
            .collect()
    }
}

/// A resource the debug panel can be opened on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceTarget {
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceTarget {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_display() {
        let list = AttributeValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.display(), "a, b");
        assert_eq!(AttributeValue::Bool(true).display(), "true");
        assert_eq!(AttributeValue::Other(serde_json::Value::Null).display(), "");
    }

    #[test]
    fn test_detail_rows_skip_type_and_name() {
        let mut payload = DebugPayload::new("Service", "svc1");
        payload.details.insert("type".into(), "ClusterIP".into());
        payload.details.insert("name".into(), "svc1".into());
        payload.details.insert("clusterIP".into(), "10.0.0.1".into());

        let rows = payload.detail_rows();
        assert_eq!(rows, vec![("clusterIP".to_string(), "10.0.0.1".to_string())]);
    }

    #[test]
    fn test_relation_group_labels() {
        let labels: Vec<&str> = RelationGroup::all().iter().map(|g| g.label()).collect();
        assert_eq!(
            labels,
            vec!["Pods", "Ingresses", "Services", "ConfigMaps", "Secrets"]
        );
        assert_eq!(RelationGroup::Ingresses.kind(), ResourceKind::Ingress);
    }

    #[test]
    fn test_target_display() {
        let target = ResourceTarget::new(ResourceKind::ConfigMap, "app-config");
        assert_eq!(target.to_string(), "configmap/app-config");
    }
}

//! Resource kind definitions
//!
//! Centralized enum for every resource kind the debug panel knows how to draw.
//! The lower-case key (`as_str`) is the same string the backend uses in
//! `/api/debug/{type}/...` and the graph widget uses as a node group.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enumeration of all resource kinds shown in the relationship graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Highlight group for the focal resource
    Current,
    Service,
    Pod,
    Ingress,
    #[serde(rename = "configmap")]
    ConfigMap,
    Secret,
}

impl ResourceKind {
    /// Lower-case key used in API paths and as the graph group name
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Current => "current",
            ResourceKind::Service => "service",
            ResourceKind::Pod => "pod",
            ResourceKind::Ingress => "ingress",
            ResourceKind::ConfigMap => "configmap",
            ResourceKind::Secret => "secret",
        }
    }

    /// Kubernetes-style display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Current => "Current",
            ResourceKind::Service => "Service",
            ResourceKind::Pod => "Pod",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
        }
    }

    /// Tooltip title shown by the graph widget
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Current => "Current Service",
            other => other.display_name(),
        }
    }

    /// Whether the debug endpoint can be opened for this kind
    pub fn is_navigable(&self) -> bool {
        !matches!(self, ResourceKind::Current)
    }

    /// All kinds, in palette order
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Current,
            ResourceKind::Service,
            ResourceKind::Pod,
            ResourceKind::Ingress,
            ResourceKind::ConfigMap,
            ResourceKind::Secret,
        ]
    }

    /// Parse a payload `type` field: lower-cased, then matched exactly
    ///
    /// Returns None for anything outside the fixed set (e.g. "Widget").
    pub fn from_payload_type(s: &str) -> Option<Self> {
        s.to_lowercase().parse().ok()
    }

    /// Lenient parsing for command line input (accepts plurals and short names)
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pod" | "pods" | "po" => Some(ResourceKind::Pod),
            "service" | "services" | "svc" => Some(ResourceKind::Service),
            "ingress" | "ingresses" | "ing" => Some(ResourceKind::Ingress),
            "configmap" | "configmaps" | "cm" => Some(ResourceKind::ConfigMap),
            "secret" | "secrets" => Some(ResourceKind::Secret),
            "current" => Some(ResourceKind::Current),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(ResourceKind::Current),
            "service" => Ok(ResourceKind::Service),
            "pod" => Ok(ResourceKind::Pod),
            "ingress" => Ok(ResourceKind::Ingress),
            "configmap" => Ok(ResourceKind::ConfigMap),
            "secret" => Ok(ResourceKind::Secret),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}

//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::graph::{LayoutSettings, NodeIdentity, Palette, PaletteError};
use crate::models::ResourceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the dashboard backend
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Namespace used when none is given on the command line
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Request timeout ("500ms", "10s", "1m")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Graph configuration
    #[serde(default)]
    pub graph: GraphConfig,

    /// Per-kind color overrides
    #[serde(default, skip_serializing_if = "PaletteConfig::is_empty")]
    pub palette: PaletteConfig,
}

/// Graph configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfig {
    /// Key nodes by `kind/name` instead of the bare name
    #[serde(default = "default_false")]
    pub kind_qualified_ids: bool,

    /// Spacing between nodes in the same rank
    #[serde(default = "default_node_spacing")]
    pub node_spacing: u32,

    /// Distance between ranks
    #[serde(default = "default_level_separation")]
    pub level_separation: u32,

    /// Delay before fitting the view after the first render
    #[serde(default = "default_fit_delay_ms")]
    pub fit_delay_ms: u64,
}

/// Palette overrides, any CSS color
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaletteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configmap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl PaletteConfig {
    pub fn get(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Current => self.current.as_deref(),
            ResourceKind::Service => self.service.as_deref(),
            ResourceKind::Pod => self.pod.as_deref(),
            ResourceKind::Ingress => self.ingress.as_deref(),
            ResourceKind::ConfigMap => self.configmap.as_deref(),
            ResourceKind::Secret => self.secret.as_deref(),
        }
    }

    pub fn set(&mut self, kind: ResourceKind, value: Option<String>) {
        let slot = match kind {
            ResourceKind::Current => &mut self.current,
            ResourceKind::Service => &mut self.service,
            ResourceKind::Pod => &mut self.pod,
            ResourceKind::Ingress => &mut self.ingress,
            ResourceKind::ConfigMap => &mut self.configmap,
            ResourceKind::Secret => &mut self.secret,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        ResourceKind::all().iter().all(|kind| self.get(*kind).is_none())
    }

    /// Built-in palette with these overrides applied
    pub fn to_palette(&self) -> Result<Palette, PaletteError> {
        Palette::with_overrides(
            ResourceKind::all()
                .iter()
                .filter_map(|kind| self.get(*kind).map(|value| (*kind, value))),
        )
    }
}

impl Config {
    pub fn node_identity(&self) -> NodeIdentity {
        if self.graph.kind_qualified_ids {
            NodeIdentity::KindQualified
        } else {
            NodeIdentity::Name
        }
    }

    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            node_spacing: self.graph.node_spacing,
            level_separation: self.graph.level_separation,
            fit_delay: Duration::from_millis(self.graph.fit_delay_ms),
        }
    }
}

// Default value functions
fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_timeout() -> String {
    "10s".to_string()
}

fn default_false() -> bool {
    false
}

fn default_node_spacing() -> u32 {
    150
}

fn default_level_separation() -> u32 {
    200
}

fn default_fit_delay_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_namespace: default_namespace(),
            timeout: default_timeout(),
            graph: GraphConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            kind_qualified_ids: default_false(),
            node_spacing: default_node_spacing(),
            level_separation: default_level_separation(),
            fit_delay_ms: default_fit_delay_ms(),
        }
    }
}

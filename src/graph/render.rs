//! Render contract for the graph widget
//!
//! The layout itself is done by an external network widget. This module
//! produces what that widget consumes: a `{nodes, edges}` dataset and an
//! options object asking for a left-to-right hierarchical layout with physics
//! disabled, cubic-bezier edges and dot-shaped nodes.

use crate::graph::model::ResourceGraph;
use crate::graph::palette::Palette;
use crate::models::ResourceKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

/// Layout knobs exposed through the config file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub node_spacing: u32,
    pub level_separation: u32,
    /// Delay before fitting the view to its container after the first render
    pub fit_delay: Duration,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            node_spacing: 150,
            level_separation: 200,
            fit_delay: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    pub color: String,
    pub group: ResourceKind,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeColor {
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
    pub arrows: &'static str,
    pub color: EdgeColor,
}

/// Node and edge collections handed to the widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkData {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeShape {
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SmoothType {
    CubicBezier,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LayoutDirection {
    #[serde(rename = "LR")]
    LeftToRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMethod {
    Directed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontOptions {
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
    pub shape: NodeShape,
    pub size: u32,
    pub font: FontOptions,
    pub border_width: u32,
    pub shadow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothOptions {
    #[serde(rename = "type")]
    pub smooth_type: SmoothType,
    pub force_direction: &'static str,
    pub roundness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeOptions {
    pub width: u32,
    pub smooth: SmoothOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchicalOptions {
    pub enabled: bool,
    pub direction: LayoutDirection,
    pub sort_method: SortMethod,
    pub node_spacing: u32,
    pub level_separation: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutOptions {
    pub hierarchical: HierarchicalOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicsOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionOptions {
    pub hover: bool,
    pub tooltip_delay: u32,
    pub zoom_view: bool,
    pub drag_view: bool,
    pub hide_edges_on_drag: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupColor {
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupOptions {
    pub color: GroupColor,
}

/// Options object understood by the widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    pub nodes: NodeOptions,
    pub edges: EdgeOptions,
    pub layout: LayoutOptions,
    pub physics: PhysicsOptions,
    pub interaction: InteractionOptions,
    pub groups: BTreeMap<ResourceKind, GroupOptions>,
}

impl RenderOptions {
    pub fn new(palette: &Palette, settings: &LayoutSettings) -> Self {
        let groups = ResourceKind::all()
            .iter()
            .map(|kind| {
                let color = palette.color(*kind).to_string();
                (
                    *kind,
                    GroupOptions {
                        color: GroupColor {
                            background: color.clone(),
                            border: color,
                        },
                    },
                )
            })
            .collect();

        Self {
            nodes: NodeOptions {
                shape: NodeShape::Dot,
                size: 16,
                font: FontOptions {
                    size: 12,
                    color: "#374151".to_string(),
                },
                border_width: 2,
                shadow: true,
            },
            edges: EdgeOptions {
                width: 2,
                smooth: SmoothOptions {
                    smooth_type: SmoothType::CubicBezier,
                    force_direction: "horizontal",
                    roundness: 0.4,
                },
            },
            layout: LayoutOptions {
                hierarchical: HierarchicalOptions {
                    enabled: true,
                    direction: LayoutDirection::LeftToRight,
                    sort_method: SortMethod::Directed,
                    node_spacing: settings.node_spacing,
                    level_separation: settings.level_separation,
                },
            },
            physics: PhysicsOptions { enabled: false },
            interaction: InteractionOptions {
                hover: true,
                tooltip_delay: 100,
                zoom_view: true,
                drag_view: true,
                hide_edges_on_drag: true,
            },
            groups,
        }
    }
}

/// Everything the widget needs for one graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedGraph {
    pub data: NetworkData,
    pub options: RenderOptions,
    #[serde(skip)]
    pub fit_delay: Duration,
}

impl RenderedGraph {
    pub fn new(graph: &ResourceGraph, palette: &Palette, settings: &LayoutSettings) -> Self {
        Self {
            data: network_data(graph, palette),
            options: RenderOptions::new(palette, settings),
            fit_delay: settings.fit_delay,
        }
    }
}

/// Convert a graph into the widget dataset
pub fn network_data(graph: &ResourceGraph, palette: &Palette) -> NetworkData {
    let nodes = graph
        .nodes()
        .iter()
        .map(|node| NetworkNode {
            id: node.id.clone(),
            label: node.label.clone(),
            color: node.color.clone(),
            group: node.kind,
            title: node.title.clone(),
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| NetworkEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
            arrows: "to",
            color: EdgeColor {
                color: palette.color(edge.kind).to_string(),
                opacity: 0.6,
            },
        })
        .collect();

    NetworkData { nodes, edges }
}

/// Graphviz rendering with the same left-to-right convention
pub fn to_dot(graph: &ResourceGraph) -> String {
    let mut out = String::from(
        "digraph resources {\n    rankdir=LR;\n    node [shape=circle, style=filled];\n",
    );
    for node in graph.nodes() {
        let _ = writeln!(
            out,
            "    \"{}\" [label=\"{}\", fillcolor=\"{}\", tooltip=\"{}\"];",
            escape_dot(&node.id),
            escape_dot(&node.label),
            node.color,
            node.title
        );
    }
    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "    \"{}\" -> \"{}\";",
            escape_dot(&edge.from),
            escape_dot(&edge.to)
        );
    }
    out.push_str("}\n");
    out
}

fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::models::{DebugPayload, RelationGroup, ResourceRef};

    #[test]
    fn test_options_contract() {
        let options = RenderOptions::new(&Palette::default(), &LayoutSettings::default());
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["layout"]["hierarchical"]["direction"], "LR");
        assert_eq!(json["layout"]["hierarchical"]["sortMethod"], "directed");
        assert_eq!(json["physics"]["enabled"], false);
        assert_eq!(json["edges"]["smooth"]["type"], "cubicBezier");
        assert_eq!(json["nodes"]["shape"], "dot");
        assert_eq!(json["groups"]["configmap"]["color"]["background"], "#6B7280");
    }

    #[test]
    fn test_edges_use_related_kind_color() {
        let mut payload = DebugPayload::new("Service", "svc1");
        payload
            .related
            .group_mut(RelationGroup::Secrets)
            .push(ResourceRef::new("tls"));
        let data = network_data(&build_graph(&payload), &Palette::default());

        assert_eq!(data.edges.len(), 1);
        assert_eq!(data.edges[0].color.color, "#EF4444");
        assert_eq!(data.edges[0].arrows, "to");
    }

    #[test]
    fn test_dot_output() {
        let mut payload = DebugPayload::new("Service", "svc1");
        payload
            .related
            .group_mut(RelationGroup::Pods)
            .push(ResourceRef::new("web-0"));
        let dot = to_dot(&build_graph(&payload));

        assert!(dot.starts_with("digraph resources {"));
        assert!(dot.contains("\"svc1\" -> \"web-0\";"));
    }
}

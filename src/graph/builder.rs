//! Graph builder for debug payloads
//!
//! Turns one debug payload (a focal resource plus its related resources) into
//! a deduplicated node/edge set ready for a hierarchical layout.

use crate::graph::model::{GraphEdge, GraphNode, ResourceGraph};
use crate::graph::palette::Palette;
use crate::graph::relations::{EdgeDirection, LegacySection, RELATED_GROUPS};
use crate::models::{AttributeValue, DebugPayload, ResourceKind, ResourceRef};
use std::collections::BTreeMap;

/// How node ids are derived from resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeIdentity {
    /// Id is the bare resource name; same-named resources of different kinds share one node
    #[default]
    Name,
    /// Id is `kind/name`
    KindQualified,
}

impl NodeIdentity {
    pub fn node_id(&self, kind: ResourceKind, name: &str) -> String {
        match self {
            NodeIdentity::Name => name.to_string(),
            NodeIdentity::KindQualified => format!("{}/{}", kind.as_str(), name),
        }
    }
}

/// Builds resource graphs from debug payloads
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    palette: Palette,
    identity: NodeIdentity,
}

impl GraphBuilder {
    pub fn new(palette: Palette, identity: NodeIdentity) -> Self {
        Self { palette, identity }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Build the graph for one payload
    pub fn build(&self, payload: &DebugPayload) -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        let focal_kind = payload.focal_kind();

        let focal_id = match (self.identity, focal_kind) {
            (NodeIdentity::KindQualified, None) => {
                format!("{}/{}", payload.resource_type.to_lowercase(), payload.name)
            }
            (identity, Some(kind)) => identity.node_id(kind, &payload.name),
            (NodeIdentity::Name, None) => payload.name.clone(),
        };

        match focal_kind {
            Some(kind) => {
                let focal = self.node(focal_id.clone(), &payload.name, kind, &payload.details);
                graph.add_node(focal);
            }
            None => {
                tracing::warn!(
                    "Unknown resource kind '{}' for {}, focal node skipped",
                    payload.resource_type,
                    payload.name
                );
            }
        }

        for relation in RELATED_GROUPS {
            let kind = relation.group.kind();
            for entry in payload.related.group(relation.group) {
                self.insert_related(&mut graph, &focal_id, entry, kind, relation.direction);
            }
        }

        for label in payload.related.other.keys() {
            tracing::debug!("Ignoring unrecognized related group '{}'", label);
        }

        if let Some(legacy) = &payload.graph {
            for section in LegacySection::all() {
                for entry in section.entries(legacy) {
                    self.insert_related(
                        &mut graph,
                        &focal_id,
                        entry,
                        section.kind(),
                        section.direction(),
                    );
                }
            }
        }

        tracing::debug!(
            "Built graph for {} '{}': {} nodes, {} edges",
            payload.resource_type,
            payload.name,
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    fn insert_related(
        &self,
        graph: &mut ResourceGraph,
        focal_id: &str,
        entry: &ResourceRef,
        kind: ResourceKind,
        direction: EdgeDirection,
    ) {
        if entry.name.is_empty() {
            tracing::warn!("Skipping {} entry without a name", kind);
            return;
        }

        let id = self.identity.node_id(kind, &entry.name);
        graph.add_node(self.node(id.clone(), &entry.name, kind, &entry.attributes));

        for (from, to) in direction.endpoints(focal_id, &id) {
            graph.add_edge(GraphEdge {
                from: from.to_string(),
                to: to.to_string(),
                kind,
            });
        }
    }

    fn node(
        &self,
        id: String,
        name: &str,
        kind: ResourceKind,
        attributes: &BTreeMap<String, AttributeValue>,
    ) -> GraphNode {
        GraphNode {
            id,
            label: name.to_string(),
            kind,
            color: self.palette.color(kind).to_string(),
            title: kind.title().to_string(),
            attributes: attributes.clone(),
        }
    }
}

/// Build a graph with the default palette and name-only node ids
pub fn build_graph(payload: &DebugPayload) -> ResourceGraph {
    GraphBuilder::default().build(payload)
}

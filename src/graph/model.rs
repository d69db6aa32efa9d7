//! Graph data structures for resource relationships
//!
//! Nodes are keyed by id and edges by their ordered `(from, to)` pair. Both
//! insertions are idempotent: the first writer wins and later attempts with the
//! same key are dropped, never merged.

use crate::models::{AttributeValue, ResourceKind};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// A node in the resource graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Unique identifier for the node
    pub id: String,
    /// Text shown under the node
    pub label: String,
    /// Resource kind (also the widget group)
    pub kind: ResourceKind,
    /// Display color derived from the kind
    pub color: String,
    /// Tooltip title
    pub title: String,
    /// Attributes of the first resource record seen with this id
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// A directed edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// Source node ID
    pub from: String,
    /// Target node ID
    pub to: String,
    /// Kind of the non-focal endpoint, used for edge coloring
    pub kind: ResourceKind,
}

/// A graph representing resource relationships
#[derive(Debug, Clone, Default)]
pub struct ResourceGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    /// Map from node ID to index in nodes vector
    node_index: HashMap<String, usize>,
    edge_index: HashSet<(String, String)>,
}

impl ResourceGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same id already exists
    ///
    /// Returns true when the node was inserted.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.node_index.contains_key(&node.id) {
            tracing::debug!("Node {} already exists, skipping", node.id);
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add an edge unless one with the same `(from, to)` already exists
    ///
    /// Endpoints are not required to exist as nodes.
    pub fn add_edge(&mut self, edge: GraphEdge) -> bool {
        let key = (edge.from.clone(), edge.to.clone());
        if self.edge_index.contains(&key) {
            tracing::debug!("Edge from {} to {} already exists, skipping", edge.from, edge.to);
            return false;
        }
        self.edge_index.insert(key);
        self.edges.push(edge);
        true
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edge_index
            .contains(&(from.to_string(), to.to_string()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Edges whose endpoints are not both present as nodes
    pub fn dangling_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(&e.from) || !self.contains_node(&e.to))
    }

    /// Assign every node a rank for a directed hierarchical layout
    ///
    /// Nodes without incoming edges start at rank 0 and each edge moves one
    /// rank to the right. Nodes only reachable through cycles (bidirectional
    /// connections) are seeded in insertion order. Returns ranks in order,
    /// with nodes inside a rank kept in insertion order.
    pub fn levels(&self) -> Vec<Vec<&GraphNode>> {
        let mut level: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        let mut has_incoming = vec![false; self.nodes.len()];

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) =
                (self.node_index.get(&edge.from), self.node_index.get(&edge.to))
            {
                outgoing[from].push(to);
                if from != to {
                    has_incoming[to] = true;
                }
            }
        }

        let mut queue = VecDeque::new();
        for (idx, incoming) in has_incoming.iter().enumerate() {
            if !incoming {
                level[idx] = Some(0);
                queue.push_back(idx);
            }
        }

        loop {
            while let Some(idx) = queue.pop_front() {
                let next = level[idx].unwrap_or(0) + 1;
                for &child in &outgoing[idx] {
                    if level[child].is_none() {
                        level[child] = Some(next);
                        queue.push_back(child);
                    }
                }
            }

            // Remaining nodes sit on cycles with no root
            match level.iter().position(Option::is_none) {
                Some(seed) => {
                    level[seed] = Some(0);
                    queue.push_back(seed);
                }
                None => break,
            }
        }

        let depth = level.iter().flatten().max().map_or(0, |max| max + 1);
        let mut ranks: Vec<Vec<&GraphNode>> = vec![Vec::new(); depth];
        for (idx, rank) in level.iter().enumerate() {
            if let Some(rank) = rank {
                ranks[*rank].push(&self.nodes[idx]);
            }
        }
        ranks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: ResourceKind) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            kind,
            color: "#000000".to_string(),
            title: kind.title().to_string(),
            attributes: BTreeMap::new(),
        }
    }

    fn edge(from: &str, to: &str) -> GraphEdge {
        GraphEdge {
            from: from.to_string(),
            to: to.to_string(),
            kind: ResourceKind::Service,
        }
    }

    #[test]
    fn test_duplicate_node_keeps_first() {
        let mut graph = ResourceGraph::new();
        let mut first = node("web", ResourceKind::Service);
        first.label = "first".to_string();
        let mut second = node("web", ResourceKind::Pod);
        second.label = "second".to_string();

        assert!(graph.add_node(first));
        assert!(!graph.add_node(second));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("web").map(|n| n.label.as_str()), Some("first"));
        assert_eq!(graph.node("web").map(|n| n.kind), Some(ResourceKind::Service));
    }

    #[test]
    fn test_duplicate_edge_is_dropped_but_reverse_is_kept() {
        let mut graph = ResourceGraph::new();
        assert!(graph.add_edge(edge("a", "b")));
        assert!(!graph.add_edge(edge("a", "b")));
        assert!(graph.add_edge(edge("b", "a")));
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("a", "b"));
        assert!(graph.has_edge("b", "a"));
    }

    #[test]
    fn test_dangling_edges() {
        let mut graph = ResourceGraph::new();
        graph.add_node(node("a", ResourceKind::Pod));
        graph.add_edge(edge("missing", "a"));
        assert_eq!(graph.dangling_edges().count(), 1);
    }

    #[test]
    fn test_levels_follow_edge_direction() {
        let mut graph = ResourceGraph::new();
        graph.add_node(node("svc", ResourceKind::Service));
        graph.add_node(node("ing", ResourceKind::Ingress));
        graph.add_node(node("pod", ResourceKind::Pod));
        graph.add_edge(edge("ing", "svc"));
        graph.add_edge(edge("svc", "pod"));

        let levels = graph.levels();
        let ids: Vec<Vec<&str>> = levels
            .iter()
            .map(|rank| rank.iter().map(|n| n.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["ing"], vec!["svc"], vec!["pod"]]);
    }

    #[test]
    fn test_levels_terminate_on_cycles() {
        let mut graph = ResourceGraph::new();
        graph.add_node(node("a", ResourceKind::Service));
        graph.add_node(node("b", ResourceKind::Service));
        graph.add_edge(edge("a", "b"));
        graph.add_edge(edge("b", "a"));

        let levels = graph.levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0][0].id, "a");
        assert_eq!(levels[1][0].id, "b");
    }
}

//! Relationship table
//!
//! One fixed table decides, for every recognized relation source, which kind
//! its entries are and which way the edge to the focal resource points. The
//! direction follows the hierarchical layout convention: the focal resource
//! points at what it owns or depends on, ingresses point at what they route to.

use crate::models::{LegacyGraph, RelationGroup, ResourceKind, ResourceRef};

/// Which way edges between the focal node and a related node point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// focal -> related
    FromFocal,
    /// related -> focal
    ToFocal,
    /// both focal -> related and related -> focal
    Both,
}

impl EdgeDirection {
    /// Ordered `(from, to)` pairs for one relation
    pub fn endpoints<'a>(&self, focal: &'a str, related: &'a str) -> Vec<(&'a str, &'a str)> {
        match self {
            EdgeDirection::FromFocal => vec![(focal, related)],
            EdgeDirection::ToFocal => vec![(related, focal)],
            EdgeDirection::Both => vec![(focal, related), (related, focal)],
        }
    }
}

/// A recognized bucket under `related`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub group: RelationGroup,
    pub direction: EdgeDirection,
}

/// Related groups in processing order
pub const RELATED_GROUPS: [Relation; 5] = [
    Relation {
        group: RelationGroup::Pods,
        direction: EdgeDirection::FromFocal,
    },
    Relation {
        group: RelationGroup::Ingresses,
        direction: EdgeDirection::ToFocal,
    },
    Relation {
        group: RelationGroup::Services,
        direction: EdgeDirection::FromFocal,
    },
    Relation {
        group: RelationGroup::ConfigMaps,
        direction: EdgeDirection::FromFocal,
    },
    Relation {
        group: RelationGroup::Secrets,
        direction: EdgeDirection::FromFocal,
    },
];

/// Sections of the legacy `graph` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacySection {
    Dependencies,
    Dependents,
    Connections,
}

impl LegacySection {
    pub fn all() -> &'static [Self] {
        &[
            LegacySection::Dependencies,
            LegacySection::Dependents,
            LegacySection::Connections,
        ]
    }

    pub fn direction(&self) -> EdgeDirection {
        match self {
            LegacySection::Dependencies => EdgeDirection::FromFocal,
            LegacySection::Dependents => EdgeDirection::ToFocal,
            LegacySection::Connections => EdgeDirection::Both,
        }
    }

    /// Legacy entries are always services
    pub fn kind(&self) -> ResourceKind {
        ResourceKind::Service
    }

    pub fn entries<'a>(&self, graph: &'a LegacyGraph) -> &'a [ResourceRef] {
        match self {
            LegacySection::Dependencies => &graph.dependencies,
            LegacySection::Dependents => &graph.dependents,
            LegacySection::Connections => &graph.connections,
        }
    }
}

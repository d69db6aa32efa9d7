//! Resource relationship graph
//!
//! Builds a typed, deduplicated node/edge set from a debug payload, resolves
//! activated nodes back to resource records, and describes the render
//! contract for the external graph widget.

pub mod builder;
pub mod model;
pub mod palette;
pub mod relations;
pub mod render;
pub mod resolve;

pub use builder::{GraphBuilder, NodeIdentity, build_graph};
pub use model::{GraphEdge, GraphNode, ResourceGraph};
pub use palette::{Palette, PaletteError};
pub use relations::{EdgeDirection, LegacySection, RELATED_GROUPS, Relation};
pub use render::{LayoutSettings, NetworkData, RenderOptions, RenderedGraph, network_data, to_dot};
pub use resolve::{ResolvedResource, resolve_node};

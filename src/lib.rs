//! nsview library
//!
//! Read-only client for a Kubernetes namespace dashboard backend. The core is
//! the debug panel: it fetches one resource's debug payload, turns its related
//! resources into a deduplicated relationship graph and hands that graph to a
//! renderer. It can be used both as a binary and as a library for testing.

pub mod api;
pub mod cli;
pub mod config;
pub mod graph;
pub mod models;
pub mod panel;

// Re-export commonly used types for convenience
pub use api::{DebugSource, FetchError, FileDebugSource, HttpDashboardClient};
pub use graph::{GraphBuilder, ResourceGraph, build_graph, resolve_node};
pub use models::{DebugPayload, ResourceKind, ResourceTarget};
pub use panel::{DebugPanel, GraphRenderer, PanelState};

//! Graph widget seam
//!
//! The panel never draws anything itself. A `GraphRenderer` turns a rendered
//! graph into a live widget and hands back an owned handle; the panel destroys
//! that handle before it renders the next graph.

use crate::graph::{RenderedGraph, ResourceGraph};

/// Render failures reported by a widget
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Error creating network: {0}")]
    Widget(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A widget capable of showing one graph at a time
pub trait GraphRenderer {
    /// Live widget instance
    type Handle;

    /// Construct a widget for the graph
    fn render(
        &mut self,
        graph: &ResourceGraph,
        rendered: &RenderedGraph,
    ) -> Result<Self::Handle, RenderError>;

    /// Fit the view to its container
    fn fit(&mut self, _handle: &mut Self::Handle) {}

    /// Tear the widget down
    fn destroy(&mut self, handle: Self::Handle);
}

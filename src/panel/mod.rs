//! Debug panel
//!
//! Drives one panel: fetch, build, render, navigate, and tear down.

mod renderer;
mod session;
mod state;

pub use renderer::{GraphRenderer, RenderError};
pub use session::{DebugPanel, GraphView};
pub use state::{LoadedPanel, PanelState};

//! Debug panel state

use crate::graph::ResourceGraph;
use crate::models::{DebugPayload, ResourceTarget};

/// A successfully loaded panel
#[derive(Debug, Clone)]
pub struct LoadedPanel {
    pub target: ResourceTarget,
    pub payload: DebugPayload,
    pub graph: ResourceGraph,
}

/// Lifecycle of one panel open: loading, then loaded or failed
#[derive(Debug, Clone, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Loading(ResourceTarget),
    Loaded(Box<LoadedPanel>),
    /// The payload could not be retrieved; shown in both the details and the
    /// related resources regions
    Failed {
        target: ResourceTarget,
        message: String,
    },
}

impl PanelState {
    pub fn target(&self) -> Option<&ResourceTarget> {
        match self {
            PanelState::Closed => None,
            PanelState::Loading(target) => Some(target),
            PanelState::Loaded(loaded) => Some(&loaded.target),
            PanelState::Failed { target, .. } => Some(target),
        }
    }

    pub fn loaded(&self) -> Option<&LoadedPanel> {
        match self {
            PanelState::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading(_))
    }

    /// Text for the details region
    pub fn details_message(&self) -> Option<&'static str> {
        match self {
            PanelState::Loading(_) => Some("Loading resource details"),
            PanelState::Failed { .. } => Some("Failed to load resource details"),
            _ => None,
        }
    }

    /// Text for the related resources region
    pub fn related_message(&self) -> Option<&'static str> {
        match self {
            PanelState::Loading(_) => Some("Loading related resources"),
            PanelState::Failed { .. } => Some("Failed to load related resources"),
            _ => None,
        }
    }
}

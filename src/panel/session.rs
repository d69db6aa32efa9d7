//! Debug panel session
//!
//! Opens the panel on a resource, fetches its payload in the background,
//! builds the graph and hands it to the renderer. Only the most recent open
//! is ever rendered: starting a new open drops the receiver of the previous
//! one, so a stale response has nowhere to go.

use super::renderer::GraphRenderer;
use super::state::{LoadedPanel, PanelState};
use crate::api::{DebugSource, FetchError};
use crate::graph::{GraphBuilder, LayoutSettings, RenderedGraph, resolve_node};
use crate::models::{DebugPayload, ResourceTarget};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// An in-flight payload fetch
struct PendingOpen {
    target: ResourceTarget,
    rx: oneshot::Receiver<Result<DebugPayload, FetchError>>,
    task: JoinHandle<()>,
}

/// The widget currently on screen
///
/// Owned by the panel and destroyed through the renderer before the next
/// graph is rendered.
pub struct GraphView<H> {
    pub target: ResourceTarget,
    pub handle: H,
    fit_at: Option<Instant>,
}

/// Debug panel for one namespace
pub struct DebugPanel<R: GraphRenderer> {
    source: Arc<dyn DebugSource>,
    renderer: R,
    builder: GraphBuilder,
    layout: LayoutSettings,
    namespace: String,
    state: PanelState,
    pending: Option<PendingOpen>,
    view: Option<GraphView<R::Handle>>,
}

impl<R: GraphRenderer> DebugPanel<R> {
    pub fn new(source: Arc<dyn DebugSource>, renderer: R, namespace: impl Into<String>) -> Self {
        Self {
            source,
            renderer,
            builder: GraphBuilder::default(),
            layout: LayoutSettings::default(),
            namespace: namespace.into(),
            state: PanelState::Closed,
            pending: None,
            view: None,
        }
    }

    pub fn with_builder(mut self, builder: GraphBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn view(&self) -> Option<&GraphView<R::Handle>> {
        self.view.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Open the panel on a resource
    ///
    /// Must be called from within a tokio runtime. Any open still waiting for
    /// its payload is superseded.
    pub fn open(&mut self, target: ResourceTarget) {
        if let Some(previous) = self.pending.take() {
            tracing::debug!("Superseding pending open of {} with {}", previous.target, target);
            previous.task.abort();
        }

        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);
        let namespace = self.namespace.clone();
        let fetch_target = target.clone();
        let task = tokio::spawn(async move {
            let result = source.fetch_debug(&namespace, &fetch_target).await;
            // The receiver is gone when this open was superseded
            let _ = tx.send(result);
        });

        tracing::debug!("Opening debug panel for {} in {}", target, self.namespace);

        self.state = PanelState::Loading(target.clone());
        self.pending = Some(PendingOpen { target, rx, task });
    }

    /// Apply a finished fetch and run a due fit, without blocking
    ///
    /// Returns true when the panel state changed.
    pub fn poll(&mut self) -> bool {
        self.fit_if_due();

        let Some(pending) = self.pending.as_mut() else {
            return false;
        };

        let result = match pending.rx.try_recv() {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => Err("Debug fetch failed".to_string()),
        };

        if let Some(pending) = self.pending.take() {
            self.apply(pending.target, result);
        }
        true
    }

    /// Wait for the current open to finish
    pub async fn wait(&mut self) -> &PanelState {
        if let Some(pending) = self.pending.take() {
            let result = match pending.rx.await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err("Debug fetch failed".to_string()),
            };
            self.apply(pending.target, result);
        }
        &self.state
    }

    /// Show an already fetched payload
    pub fn show(&mut self, target: ResourceTarget, payload: DebugPayload) {
        if let Some(previous) = self.pending.take() {
            previous.task.abort();
        }
        self.apply(target, Ok(payload));
    }

    /// Navigate to the resource behind an activated node
    ///
    /// Returns the new target, or None when the id does not resolve.
    pub fn activate_node(&mut self, node_id: &str) -> Option<ResourceTarget> {
        let target = self
            .state
            .loaded()
            .and_then(|loaded| resolve_node(node_id, &loaded.payload))
            .map(|resolved| resolved.target());

        match target {
            Some(target) => {
                self.open(target.clone());
                Some(target)
            }
            None => {
                tracing::debug!("Node {} does not resolve to a related resource", node_id);
                None
            }
        }
    }

    /// Refit the current view (e.g. after the graph tab becomes visible)
    pub fn fit(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.fit_at = None;
            self.renderer.fit(&mut view.handle);
        }
    }

    /// Close the panel, cancelling any pending open and destroying the view
    pub fn close(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
        self.teardown();
        self.state = PanelState::Closed;
    }

    fn apply(&mut self, target: ResourceTarget, result: Result<DebugPayload, String>) {
        let payload = match result {
            Ok(payload) => payload,
            Err(message) => {
                tracing::warn!("Failed to load debug payload for {}: {}", target, message);
                self.state = PanelState::Failed { target, message };
                return;
            }
        };

        let graph = self.builder.build(&payload);

        self.teardown();
        let rendered = RenderedGraph::new(&graph, self.builder.palette(), &self.layout);
        match self.renderer.render(&graph, &rendered) {
            Ok(handle) => {
                self.view = Some(GraphView {
                    target: target.clone(),
                    handle,
                    fit_at: Some(Instant::now() + rendered.fit_delay),
                });
            }
            Err(e) => {
                tracing::error!("Error creating network for {}: {}", target, e);
            }
        }

        self.state = PanelState::Loaded(Box::new(LoadedPanel {
            target,
            payload,
            graph,
        }));
    }

    fn fit_if_due(&mut self) {
        if let Some(view) = self.view.as_mut() {
            if view.fit_at.is_some_and(|at| Instant::now() >= at) {
                view.fit_at = None;
                self.renderer.fit(&mut view.handle);
            }
        }
    }

    fn teardown(&mut self) {
        if let Some(view) = self.view.take() {
            tracing::debug!("Destroying graph view for {}", view.target);
            self.renderer.destroy(view.handle);
        }
    }
}

impl<R: GraphRenderer> Drop for DebugPanel<R> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
        self.teardown();
    }
}

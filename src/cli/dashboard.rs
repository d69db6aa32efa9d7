//! Dashboard commands
//!
//! Each command talks to the backend (or a local payload file for the debug
//! panel) and prints one view to stdout.

use super::output::{self, GraphFormat, TextRenderer};
use crate::api::{DebugSource, FileDebugSource, HttpDashboardClient, parse_duration};
use crate::config::Config;
use crate::graph::{GraphBuilder, resolve_node};
use crate::models::{ResourceKind, ResourceTarget};
use crate::panel::{DebugPanel, PanelState};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings shared by every dashboard command
pub struct Session {
    pub config: Config,
    pub namespace: String,
}

impl Session {
    pub fn new(config: Config, namespace: Option<String>) -> Self {
        let namespace = namespace.unwrap_or_else(|| config.default_namespace.clone());
        Self { config, namespace }
    }

    pub fn client(&self) -> Result<HttpDashboardClient> {
        let timeout = parse_duration(&self.config.timeout)
            .with_context(|| format!("Invalid timeout: {}", self.config.timeout))?;
        HttpDashboardClient::new(&self.config.endpoint, timeout)
            .context("Failed to create dashboard client")
    }

    fn debug_source(&self, payload: Option<PathBuf>) -> Result<Arc<dyn DebugSource>> {
        Ok(match payload {
            Some(path) => Arc::new(FileDebugSource::new(path)),
            None => Arc::new(self.client()?),
        })
    }

    fn panel<W: Write>(
        &self,
        source: Arc<dyn DebugSource>,
        renderer: TextRenderer<W>,
    ) -> Result<DebugPanel<TextRenderer<W>>> {
        let palette = self
            .config
            .palette
            .to_palette()
            .context("Invalid palette configuration")?;
        let builder = GraphBuilder::new(palette, self.config.node_identity());
        Ok(DebugPanel::new(source, renderer, self.namespace.clone())
            .with_builder(builder)
            .with_layout(self.config.layout_settings()))
    }
}

/// Parse a resource kind from the command line (plurals and short names allowed)
pub fn parse_kind(s: &str) -> Result<ResourceKind, String> {
    ResourceKind::from_str_case_insensitive(s)
        .filter(ResourceKind::is_navigable)
        .ok_or_else(|| format!("unknown resource type '{}'", s))
}

/// Open the debug panel on a resource and print it
pub async fn debug(
    session: &Session,
    target: ResourceTarget,
    format: GraphFormat,
    payload: Option<PathBuf>,
) -> Result<()> {
    let source = session.debug_source(payload)?;
    let mut panel = session.panel(source, TextRenderer::new(std::io::stdout(), format))?;

    panel.open(target);
    let state = panel.wait().await;
    print_panel(state, format)
}

/// Resolve a node id against a resource's payload
///
/// With `follow`, the panel navigates to the resolved resource and prints it.
pub async fn resolve(
    session: &Session,
    target: ResourceTarget,
    node_id: &str,
    follow: bool,
    format: GraphFormat,
    payload: Option<PathBuf>,
) -> Result<()> {
    let source = session.debug_source(payload)?;

    if !follow {
        let payload = source
            .fetch_debug(&session.namespace, &target)
            .await
            .with_context(|| format!("Failed to load {}", target))?;
        let resolved = resolve_node(node_id, &payload)
            .ok_or_else(|| anyhow::anyhow!("Node '{}' not found in {}", node_id, target))?;
        println!("{}", resolved.target());
        return Ok(());
    }

    // Only the view reached by navigation is printed
    let mut renderer = TextRenderer::new(std::io::stdout(), format);
    renderer.set_quiet(true);
    let mut panel = session.panel(source, renderer)?;
    panel.open(target.clone());
    if let PanelState::Failed { message, .. } = panel.wait().await {
        anyhow::bail!("Failed to load {}: {}", target, message);
    }

    let next = panel
        .activate_node(node_id)
        .ok_or_else(|| anyhow::anyhow!("Node '{}' not found in {}", node_id, target))?;
    tracing::debug!("Navigating from {} to {}", target, next);

    panel.renderer_mut().set_quiet(false);
    let state = panel.wait().await;
    print_panel(state, format)
}

fn print_panel(state: &PanelState, format: GraphFormat) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match state {
        PanelState::Loaded(loaded) => {
            if format != GraphFormat::Tree {
                return Ok(());
            }
            let payload = &loaded.payload;
            writeln!(out, "\n{} {}", loaded.target.kind.display_name(), payload.name)?;
            writeln!(out, "\nDetails:")?;
            output::write_details(&mut out, payload)?;
            writeln!(out, "\nRelated:")?;
            output::write_related(&mut out, payload)?;
            writeln!(out, "\nEvents:")?;
            output::write_payload_events(&mut out, payload)?;
            Ok(())
        }
        PanelState::Failed { target, message } => {
            eprintln!("{}", state.details_message().unwrap_or_default());
            eprintln!("{}", state.related_message().unwrap_or_default());
            anyhow::bail!("{}: {}", target, message)
        }
        PanelState::Loading(target) => anyhow::bail!("{} is still loading", target),
        PanelState::Closed => Ok(()),
    }
}

pub async fn namespaces(session: &Session) -> Result<()> {
    let namespaces = session.client()?.namespaces().await?;
    let mut out = std::io::stdout().lock();
    for namespace in namespaces {
        writeln!(out, "{}", namespace)?;
    }
    Ok(())
}

pub async fn health(session: &Session) -> Result<()> {
    let pods = session.client()?.health(&session.namespace).await?;
    output::write_health(&mut std::io::stdout().lock(), &pods)?;
    Ok(())
}

pub async fn images(session: &Session, all: bool) -> Result<()> {
    let client = session.client()?;
    let images = if all {
        client.all_images().await?
    } else {
        client.images(&session.namespace).await?
    };
    output::write_images(&mut std::io::stdout().lock(), &images)?;
    Ok(())
}

pub async fn events(session: &Session) -> Result<()> {
    let events = session.client()?.events(&session.namespace).await?;
    let warnings = events.iter().filter(|event| event.is_warning()).count();
    tracing::debug!(
        "Fetched {} events ({} warnings) in {}",
        events.len(),
        warnings,
        session.namespace
    );
    output::write_events(&mut std::io::stdout().lock(), &events)?;
    Ok(())
}

pub async fn pod(session: &Session, name: &str) -> Result<()> {
    let pod = session.client()?.pod(&session.namespace, name).await?;
    output::write_pod(&mut std::io::stdout().lock(), &pod)?;
    Ok(())
}

/// Raw list of one resource type, one JSON document per row
pub async fn list(session: &Session, kind: ResourceKind) -> Result<()> {
    let rows = session
        .client()?
        .resource_list(kind, &session.namespace)
        .await?;
    let mut out = std::io::stdout().lock();
    for row in rows {
        writeln!(out, "{}", serde_json::to_string(&row)?)?;
    }
    Ok(())
}

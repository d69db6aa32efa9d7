//! Configuration system for nsview
//!
//! Layers built-in defaults, the root `config.yaml` and `NSVIEW_*`
//! environment overrides.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, GraphConfig, PaletteConfig};

use crate::models::ResourceKind;
use anyhow::Context;

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    if let Some(kind) = key.strip_prefix("palette.") {
        let kind = palette_kind(kind)?;
        return Ok(config.palette.get(kind).unwrap_or_default().to_string());
    }

    match key {
        "endpoint" => Ok(config.endpoint.clone()),
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "timeout" => Ok(config.timeout.clone()),
        "graph.kindQualifiedIds" => Ok(config.graph.kind_qualified_ids.to_string()),
        "graph.nodeSpacing" => Ok(config.graph.node_spacing.to_string()),
        "graph.levelSeparation" => Ok(config.graph.level_separation.to_string()),
        "graph.fitDelayMs" => Ok(config.graph.fit_delay_ms.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
///
/// An empty value clears a palette override.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    if let Some(kind) = key.strip_prefix("palette.") {
        let kind = palette_kind(kind)?;
        if value.is_empty() {
            config.palette.set(kind, None);
        } else {
            crate::graph::palette::normalize_color(kind, value)?;
            config.palette.set(kind, Some(value.to_string()));
        }
        return Ok(());
    }

    match key {
        "endpoint" => {
            config.endpoint = value.to_string();
        }
        "defaultNamespace" => {
            config.default_namespace = value.to_string();
        }
        "timeout" => {
            crate::api::parse_duration(value)
                .context("timeout must look like '500ms', '10s' or '1m'")?;
            config.timeout = value.to_string();
        }
        "graph.kindQualifiedIds" => {
            config.graph.kind_qualified_ids = value
                .parse()
                .context("graph.kindQualifiedIds must be 'true' or 'false'")?;
        }
        "graph.nodeSpacing" => {
            config.graph.node_spacing = value
                .parse()
                .context("graph.nodeSpacing must be a number")?;
        }
        "graph.levelSeparation" => {
            config.graph.level_separation = value
                .parse()
                .context("graph.levelSeparation must be a number")?;
        }
        "graph.fitDelayMs" => {
            config.graph.fit_delay_ms = value
                .parse()
                .context("graph.fitDelayMs must be a number")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

fn palette_kind(key: &str) -> anyhow::Result<ResourceKind> {
    ResourceKind::from_payload_type(key)
        .ok_or_else(|| anyhow::anyhow!("Unknown palette key: palette.{}", key))
}

//! Per-kind node colors
//!
//! The built-in palette can be overridden per kind from the config file. Any
//! CSS color is accepted and normalized to `#RRGGBB`.

use crate::models::ResourceKind;
use std::collections::BTreeMap;

/// Palette errors
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Invalid color '{value}' for {kind}: {reason}")]
    InvalidColor {
        kind: ResourceKind,
        value: String,
        reason: String,
    },
}

/// Built-in color for a kind
pub fn default_color(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Current => "#3B82F6",
        ResourceKind::Service => "#F59E0B",
        ResourceKind::Pod => "#10B981",
        ResourceKind::Ingress => "#8B5CF6",
        ResourceKind::ConfigMap => "#6B7280",
        ResourceKind::Secret => "#EF4444",
    }
}

/// Parse any CSS color and normalize it to upper-case `#RRGGBB`
pub fn normalize_color(kind: ResourceKind, value: &str) -> Result<String, PaletteError> {
    let color = csscolorparser::parse(value).map_err(|e| PaletteError::InvalidColor {
        kind,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    let [r, g, b, _] = color.to_rgba8();
    Ok(format!("#{:02X}{:02X}{:02X}", r, g, b))
}

/// Fixed mapping from kind to display color
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: BTreeMap<ResourceKind, String>,
}

impl Palette {
    /// Apply overrides on top of the built-in palette
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (ResourceKind, &'a str)>,
    {
        let mut palette = Self::default();
        for (kind, value) in overrides {
            let color = normalize_color(kind, value)?;
            palette.colors.insert(kind, color);
        }
        Ok(palette)
    }

    pub fn color(&self, kind: ResourceKind) -> &str {
        self.colors
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| default_color(kind))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: ResourceKind::all()
                .iter()
                .map(|kind| (*kind, default_color(*kind).to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.color(ResourceKind::Pod), "#10B981");
        assert_eq!(palette.color(ResourceKind::Current), "#3B82F6");
    }

    #[test]
    fn test_overrides_are_normalized() {
        let palette = Palette::with_overrides([
            (ResourceKind::Secret, "red"),
            (ResourceKind::Pod, "#0f0"),
        ])
        .unwrap();
        assert_eq!(palette.color(ResourceKind::Secret), "#FF0000");
        assert_eq!(palette.color(ResourceKind::Pod), "#00FF00");
        assert_eq!(palette.color(ResourceKind::Service), "#F59E0B");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = Palette::with_overrides([(ResourceKind::Ingress, "not-a-color")]).unwrap_err();
        assert!(err.to_string().contains("Ingress"));
    }
}

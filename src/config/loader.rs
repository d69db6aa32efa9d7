//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{paths, schema::Config};
use crate::api::parse_duration;
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Same layering as [`ConfigLoader::load`] with an explicit root file
    pub fn load_from(path: &Path) -> Result<Config> {
        let mut config = Self::load_defaults();

        if path.exists() {
            config = Self::load_file(path)?;
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    ///
    /// Missing keys fall back to their defaults.
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values that serde cannot check on its own
    ///
    /// Fails on:
    /// - An endpoint that is not an absolute http(s) URL
    /// - An unparseable timeout
    /// - A palette entry that is not a CSS color
    pub fn validate(config: &Config) -> Result<()> {
        let endpoint = url::Url::parse(&config.endpoint)
            .with_context(|| format!("endpoint is not a valid URL: {}", config.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("endpoint must use http or https: {}", config.endpoint);
        }

        parse_duration(&config.timeout)
            .with_context(|| format!("timeout is not a valid duration: {}", config.timeout))?;

        config
            .palette
            .to_palette()
            .context("palette contains an invalid color")?;

        if config.default_namespace.trim().is_empty() {
            anyhow::bail!("defaultNamespace must not be empty");
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(endpoint) = std::env::var("NSVIEW_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(namespace) = std::env::var("NSVIEW_NAMESPACE") {
            config.default_namespace = namespace;
        }

        if let Ok(timeout) = std::env::var("NSVIEW_TIMEOUT") {
            config.timeout = timeout;
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.default_namespace, "default");
        assert_eq!(config.timeout, "10s");
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.endpoint = "https://dash.example.com".to_string();
        config.graph.kind_qualified_ids = true;
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::load_file(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_load_file_rejects_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "graph: [not, a, map]").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.timeout = "soon".to_string();
        assert!(ConfigLoader::validate(&config).is_err());

        let mut config = Config::default();
        config.endpoint = "ftp://dash".to_string();
        assert!(ConfigLoader::validate(&config).is_err());

        let mut config = Config::default();
        config.palette.pod = Some("not-a-color".to_string());
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test in this crate reads these variables.
        unsafe {
            std::env::set_var("NSVIEW_ENDPOINT", "http://override:1234");
            std::env::set_var("NSVIEW_TIMEOUT", "3s");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.endpoint, "http://override:1234");
        assert_eq!(config.timeout, "3s");

        // SAFETY: same as above.
        unsafe {
            std::env::remove_var("NSVIEW_ENDPOINT");
            std::env::remove_var("NSVIEW_TIMEOUT");
        }
    }
}

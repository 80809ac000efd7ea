//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::Config};
use crate::constants::ENV_PREFIX;
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Context-specific config
    /// 3. Root config
    /// 4. Built-in defaults
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load(context: Option<&str>) -> Result<Config> {
        let context_path = context.map(paths::context_config_path);
        Self::load_from(&paths::root_config_path(), context_path.as_deref())
    }

    /// Load configuration from explicit root and context files
    ///
    /// Layers are merged key by key, so a context file only needs the keys it
    /// changes. Missing files are skipped; unreadable or malformed files are
    /// errors.
    pub fn load_from(root_path: &Path, context_path: Option<&Path>) -> Result<Config> {
        let mut merged = serde_yaml::to_value(Self::load_defaults())
            .context("Failed to serialize default configuration")?;

        for path in std::iter::once(root_path).chain(context_path) {
            if !path.exists() {
                continue;
            }
            tracing::debug!("Loading config layer: {}", path.display());
            if let Some(layer) = Self::read_layer(path)? {
                merge_values(&mut merged, layer);
            }
        }

        let config: Config =
            serde_yaml::from_value(merged).context("Failed to merge configuration layers")?;
        Ok(Self::apply_env_overrides(config))
    }

    /// Read one layer as raw YAML after checking it against the schema
    fn read_layer(path: &Path) -> Result<Option<Value>> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        serde_yaml::from_str::<Config>(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        let layer = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(Some(layer))
    }

    /// Load configuration from a file
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

    /// Validate configuration by loading and checking for errors
    ///
    /// Fails on invalid YAML, invalid value types, unreadable files and a
    /// server address that is not a usable base URL.
    pub fn validate(context: Option<&str>) -> Result<()> {
        let config = Self::load(context).context("Failed to load merged configuration")?;
        Self::validate_config(&config)
    }

    /// Check values that parse but cannot work
    pub fn validate_config(config: &Config) -> Result<()> {
        let url = url::Url::parse(&config.server)
            .with_context(|| format!("server is not a valid URL: {}", config.server))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "server must be an http(s) URL, got: {}",
                config.server
            ));
        }
        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        let var = |name: &str| std::env::var(format!("{}_{}", ENV_PREFIX, name));

        if let Ok(server) = var("SERVER") {
            config.server = server;
        }

        if let Ok(context) = var("CONTEXT") {
            config.kube_context = Some(context).filter(|c| !c.is_empty());
        }

        if let Ok(read_only) = var("READ_ONLY") {
            if let Ok(val) = read_only.parse::<bool>() {
                config.read_only = val;
            }
        }

        if let Ok(namespace) = var("DEFAULT_NAMESPACE") {
            config.default_namespace = namespace;
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
    pub fn save_root(config: &Config) -> Result<PathBuf> {
        let path = paths::root_config_path();
        Self::save(config, &path)?;
        Ok(path)
    }

    /// Save context-specific configuration
    pub fn save_context(config: &Config, context: &str) -> Result<PathBuf> {
        let path = paths::context_config_path(context);
        Self::save(config, &path)?;
        Ok(path)
    }
}

/// Merge `layer` into `base`; mappings merge per key, anything else replaces
fn merge_values(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Mapping(base), Value::Mapping(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}

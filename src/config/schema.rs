//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::constants::DEFAULT_SERVER;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the release backend
    #[serde(default = "default_server")]
    pub server: String,

    /// Cluster context sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_context: Option<String>,

    /// Namespace preselected in the release list filter
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_namespace: String,

    /// Disable rollback, reconfigure, uninstall and test runs
    #[serde(default = "default_false")]
    pub read_only: bool,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse support
    #[serde(default = "default_false")]
    pub enable_mouse: bool,

    /// Disable Unicode icons for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,

    /// Show timestamps with a 12-hour clock
    #[serde(default = "default_false")]
    pub hour12: bool,
}

// Default value functions
fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_false() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            kube_context: None,
            default_namespace: String::new(),
            read_only: default_false(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_mouse: default_false(),
            no_icons: default_false(),
            hour12: default_false(),
        }
    }
}

impl Config {
    /// Apply command-line overrides, which beat every other layer
    pub fn with_overrides(mut self, server: Option<String>, context: Option<String>) -> Self {
        if let Some(server) = server {
            self.server = server;
        }
        if let Some(context) = context {
            self.kube_context = Some(context).filter(|c| !c.is_empty());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(!config.read_only);
        assert_eq!(config.server, "http://localhost:8080");
        assert!(config.kube_context.is_none());
        assert!(!config.ui.hour12);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            kube_context: Some("kind-dev".to_string()),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("readOnly"));
        assert!(yaml.contains("kubeContext: kind-dev"));
        assert!(!yaml.contains("defaultNamespace"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
server: https://helm.example.com
readOnly: true
defaultNamespace: web
ui:
  hour12: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.read_only);
        assert_eq!(config.server, "https://helm.example.com");
        assert_eq!(config.default_namespace, "web");
        assert!(config.ui.hour12);
        assert!(!config.ui.no_icons);
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_overrides(
            Some("http://10.0.0.5:8080".to_string()),
            Some(String::new()),
        );
        assert_eq!(config.server, "http://10.0.0.5:8080");
        assert!(config.kube_context.is_none());
    }
}

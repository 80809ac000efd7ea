//! Configuration system for helmdeck
//!
//! Layered YAML configuration: built-in defaults, a root file, a per-context
//! file and environment overrides.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;
pub use schema::UiConfig;

/// Keys accepted by `config get` and `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "server",
    "kubeContext",
    "defaultNamespace",
    "readOnly",
    "ui.enableMouse",
    "ui.noIcons",
    "ui.hour12",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "server" => Ok(config.server.clone()),
        "kubeContext" => Ok(config.kube_context.clone().unwrap_or_default()),
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "readOnly" => Ok(config.read_only.to_string()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        "ui.hour12" => Ok(config.ui.hour12.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "server" => {
            let url = url::Url::parse(value)
                .with_context(|| format!("server must be a URL, got '{}'", value))?;
            config.server = url.to_string();
        }
        "kubeContext" => {
            config.kube_context = Some(value.to_string()).filter(|v| !v.is_empty());
        }
        "defaultNamespace" => {
            config.default_namespace = value.to_string();
        }
        "readOnly" => {
            config.read_only = value
                .parse()
                .context("readOnly must be 'true' or 'false'")?;
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.noIcons" => {
            config.ui.no_icons = value
                .parse()
                .context("ui.noIcons must be 'true' or 'false'")?;
        }
        "ui.hour12" => {
            config.ui.hour12 = value
                .parse()
                .context("ui.hour12 must be 'true' or 'false'")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

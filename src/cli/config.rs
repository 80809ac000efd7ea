//! Configuration subcommand handlers

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{self, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "server", "ui.hour12")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "server", "readOnly")
        key: String,
        /// Configuration value
        value: String,
        /// Save to the config file of this cluster context
        #[arg(long)]
        context: Option<String>,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
///
/// `context` is the context selected on the command line, if any; it picks
/// the context file layer.
pub fn handle_config_command(cmd: ConfigSubcommand, context: Option<&str>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load(context).context("Failed to load configuration")?;

            if let Some(key) = key {
                println!("{}", config::get_config_value(&config, &key)?);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set {
            key,
            value,
            context: target,
        } => {
            // Only the target file is rewritten, not the merged view
            let path = match target.as_deref() {
                Some(ctx) => paths::context_config_path(ctx),
                None => paths::root_config_path(),
            };
            let mut config = if path.exists() {
                ConfigLoader::load_file(&path)?
            } else {
                ConfigLoader::load_defaults()
            };

            config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save(&config, &path).context("Failed to save configuration")?;
            match target {
                Some(ctx) => println!("Configuration saved for context: {}", ctx),
                None => println!("Configuration saved"),
            }
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load(context).context("Failed to load configuration")?;
            for key in config::CONFIG_KEYS {
                println!("{}: {}", key, config::get_config_value(&config, key)?);
            }
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
            if let Some(ctx) = context {
                println!("{}", paths::context_config_path(ctx).display());
            }
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::validate(context).context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}

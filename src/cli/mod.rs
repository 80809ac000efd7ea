//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod config;
mod logging;
mod releases;
mod version;

pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::*;
pub use releases::{ReleaseCommand, handle_release_command};
pub use version::display_version;

//! Cross-platform directory path resolution
//!
//! - Linux/macOS: XDG Base Directory specification (~/.config, ~/.local/share)
//! - Windows: Known Folder API (AppData\Roaming, AppData\Local)
//!
//! `HELMDECK_CONFIG_DIR` and `HELMDECK_DATA_DIR` replace the platform
//! directory entirely.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "helmdeck";

/// The two directories helmdeck reads files from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirKind {
    /// Root config file
    Config,
    /// Per-context config files
    Data,
}

impl DirKind {
    fn override_var(self) -> &'static str {
        match self {
            DirKind::Config => "HELMDECK_CONFIG_DIR",
            DirKind::Data => "HELMDECK_DATA_DIR",
        }
    }

    #[cfg_attr(windows, allow(dead_code))]
    fn xdg_var(self) -> &'static str {
        match self {
            DirKind::Config => "XDG_CONFIG_HOME",
            DirKind::Data => "XDG_DATA_HOME",
        }
    }

    /// Base directory under `home` when no XDG variable is set
    fn under_home(self, home: &Path) -> PathBuf {
        match self {
            DirKind::Config => home.join(".config"),
            DirKind::Data => home.join(".local").join("share"),
        }
    }
}

fn resolve_dir(kind: DirKind) -> PathBuf {
    std::env::var(kind.override_var())
        .map(PathBuf::from)
        .unwrap_or_else(|_| platform_dir(kind))
}

#[cfg(windows)]
fn platform_dir(kind: DirKind) -> PathBuf {
    use directories::ProjectDirs;
    ProjectDirs::from("", "", APP_DIR)
        .map(|dirs| match kind {
            DirKind::Config => dirs.config_dir().to_path_buf(),
            DirKind::Data => dirs.data_dir().to_path_buf(),
        })
        .unwrap_or_else(|| kind.under_home(Path::new(".")).join(APP_DIR))
}

#[cfg(not(windows))]
fn platform_dir(kind: DirKind) -> PathBuf {
    use directories::BaseDirs;
    std::env::var(kind.xdg_var())
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            BaseDirs::new()
                .map(|dirs| kind.under_home(dirs.home_dir()))
                .unwrap_or_else(|| kind.under_home(Path::new(".")))
        })
        .join(APP_DIR)
}

/// Get the configuration directory path
///
/// Unix: XDG_CONFIG_HOME/helmdeck or ~/.config/helmdeck.
/// Windows: %APPDATA%\helmdeck\config
pub fn config_dir() -> PathBuf {
    resolve_dir(DirKind::Config)
}

/// Get the data directory path
///
/// Unix: XDG_DATA_HOME/helmdeck or ~/.local/share/helmdeck.
/// Windows: %LOCALAPPDATA%\helmdeck\data
pub fn data_dir() -> PathBuf {
    resolve_dir(DirKind::Data)
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Get the context-specific config file path
pub fn context_config_path(context: &str) -> PathBuf {
    data_dir()
        .join("contexts")
        .join(context)
        .join("config.yaml")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

//! Centralized keybindings
//!
//! Single source of truth for the footer and the help overlay.

/// Keybinding and its label
#[derive(Debug, Clone, Copy)]
pub struct NavigationCommand {
    pub key: &'static str,
    pub label: &'static str,
}

impl NavigationCommand {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Keys available on the release list
pub fn list_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("j/k", "Navigate"),
        NavigationCommand::new("Enter", "Open"),
        NavigationCommand::new("/", "Filter"),
        NavigationCommand::new("r", "Refresh"),
        NavigationCommand::new("?", "Help"),
        NavigationCommand::new("q", "Quit"),
    ]
}

/// Keys available on the release page
///
/// Mutating actions are left out in read-only mode.
pub fn detail_commands(read_only: bool) -> Vec<NavigationCommand> {
    let mut commands = vec![
        NavigationCommand::new("Tab", "Next tab"),
        NavigationCommand::new("1-4", "Tab"),
        NavigationCommand::new("j/k", "Scroll"),
        NavigationCommand::new("c", "Check version"),
    ];
    if !read_only {
        commands.extend([
            NavigationCommand::new("u", "Upgrade"),
            NavigationCommand::new("b", "Rollback"),
            NavigationCommand::new("t", "Tests"),
            NavigationCommand::new("d", "Uninstall"),
        ]);
    }
    commands.push(NavigationCommand::new("Esc", "Back"));
    commands
}

/// Keys inside the reconfigure dialog
pub fn reconfigure_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("Tab", "Versions/Values"),
        NavigationCommand::new("j/k", "Select version"),
        NavigationCommand::new("Ctrl+S", "Submit"),
        NavigationCommand::new("Esc", "Close"),
    ]
}

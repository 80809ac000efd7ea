//! Application state structures
//!
//! Groups the App's presentation-only fields. Backend state lives in the
//! headless views of the services layer.

use std::time::Instant;

/// Screens of the application
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    ReleaseList,
    ReleaseDetail,
}

/// Which part of the reconfigure dialog receives keys
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ReconfigureFocus {
    #[default]
    Versions,
    Values,
}

/// Presentation state (filter input, scrolling, status messages)
#[derive(Debug)]
pub struct UIState {
    pub screen: Screen,
    /// Whether filter mode is active (user is typing)
    pub filter_mode: bool,
    /// Whether to show help overlay
    pub show_help: bool,
    /// Status message to display (message, is_error)
    pub status_message: Option<(String, bool)>,
    /// When status message was set (for auto-clearing)
    pub status_message_time: Option<Instant>,
    /// Scroll offset of the release list
    pub list_scroll_offset: usize,
    /// Scroll offset of the detail tab content
    pub detail_scroll: u16,
    pub reconfigure_focus: ReconfigureFocus,
    /// Cursor in the reconfigure version list
    pub version_cursor: usize,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            screen: Screen::ReleaseList,
            filter_mode: false,
            show_help: false,
            status_message: None,
            status_message_time: None,
            list_scroll_offset: 0,
            detail_scroll: 0,
            reconfigure_focus: ReconfigureFocus::default(),
            version_cursor: 0,
        }
    }
}

//! Constants used throughout the TUI module

/// Minimum header height
pub const HEADER_HEIGHT: u16 = 3;

/// Footer height
pub const FOOTER_HEIGHT: u16 = 3;

/// Input poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 100;

/// Rows kept visible above/below the selection when scrolling
pub const SCROLL_BUFFER: usize = 2;

//! Application module
//!
//! The TUI application state, split into state, events and rendering.

pub mod state;

mod core;
mod events;
mod rendering;

pub use core::*;
pub use state::{ReconfigureFocus, Screen};

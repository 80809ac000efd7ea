//! Service layer for release lifecycle logic
//!
//! Views in this module are headless state machines. They never perform I/O
//! themselves: every backend call is returned as a [`Command`], executed by
//! [`ReleaseService`], and its result is polled back into the view. This keeps
//! the TUI and CLI layers focused on presentation.

pub mod command;
pub mod inflight;
pub mod reconfigure;
pub mod release_list;
pub mod release_service;
pub mod release_view;
pub mod route;

pub use command::Command;
pub use inflight::{InFlight, Loadable, Ticket};
pub use reconfigure::{ReconfigureForm, ReconfigureOutcome};
pub use release_list::ReleaseList;
pub use release_service::{ReleaseService, spawn_command};
pub use release_view::{Dialog, ReleaseView, UninstallState, UpgradeAction, ViewOptions};
pub use route::Route;

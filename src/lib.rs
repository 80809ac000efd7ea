//! helmdeck library
//!
//! Client, session logic and configuration for the helmdeck release
//! dashboard. It can be used both as a binary and as a library for testing.

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use api::{ClientError, ClientResult, HttpReleaseClient, ReleaseApi};
pub use models::{ChartVersionOption, LatestVersionResult, Release, ResourceRef, TestResult};
pub use services::{ReconfigureForm, ReleaseList, ReleaseService, ReleaseView, Route};

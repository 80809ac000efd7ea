//! Constants shared across the crate
//!
//! Backend paths, header names and user-facing messages live here so they
//! are defined once.

/// Root of the backend's Helm API
pub const API_ROOT: &[&str] = &["api", "helm"];

/// Header carrying the selected cluster context
pub const KUBE_CONTEXT_HEADER: &str = "X-Kubecontext";

/// Default backend address
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// Shown when a read or a non-reconfigure mutation fails
pub const GENERIC_RETRY_PROMPT: &str = "Request failed. Please try again.";

/// Shown when a reconfigure fails for any reason other than a backend rejection
pub const RECONFIGURE_FAILED_PROMPT: &str = "Failed to update";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "HELMDECK";

/// Status message timeout in seconds
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;

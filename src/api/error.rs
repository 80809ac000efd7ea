//! Client error taxonomy

use crate::constants::{GENERIC_RETRY_PROMPT, RECONFIGURE_FAILED_PROMPT};

/// Errors returned by every backend operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Transport failure or a gateway that could not reach the backend
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Release or chart missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend (or local validation) rejected the inputs
    #[error("{0}")]
    ValidationRejected(String),

    #[error("Unexpected backend response: {0}")]
    Unknown(String),
}

/// Result type for backend operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map a non-success HTTP status and its body onto the taxonomy
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        };

        match status {
            404 => ClientError::NotFound(message),
            502..=504 => ClientError::BackendUnavailable(message),
            400..=499 => ClientError::ValidationRejected(message),
            _ => ClientError::Unknown(message),
        }
    }

    /// Message shown next to a failed action: always the generic retry prompt
    pub fn user_message(&self) -> String {
        GENERIC_RETRY_PROMPT.to_string()
    }

    /// Message shown when a reconfigure fails
    ///
    /// Backend rejections are shown verbatim so the user can fix their values.
    pub fn reconfigure_message(&self) -> String {
        match self {
            ClientError::ValidationRejected(msg) => msg.clone(),
            _ => RECONFIGURE_FAILED_PROMPT.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Unknown(format!("Failed to decode response: {}", err))
        } else if let Some(status) = err.status() {
            ClientError::from_status(status.as_u16(), "")
        } else {
            ClientError::BackendUnavailable(err.to_string())
        }
    }
}

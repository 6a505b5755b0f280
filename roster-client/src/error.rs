//! Client error types

use http::StatusCode;
use shared::{DraftError, MappingError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, no response from the server
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{}", http_message(.status, .message))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },

    /// Server answered 2xx but with `"success": false`
    #[error("{message}")]
    Rejected { message: String },

    /// Input refused before any request was made
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Record could not be normalized
    #[error("Invalid employee record: {0}")]
    Mapping(#[from] MappingError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

fn http_message(status: &StatusCode, message: &Option<String>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => msg.clone(),
        _ => format!("HTTP {}", status.as_u16()),
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

//! API error types

use thiserror::Error;

use crate::models::{ErrorBody, ServiceError};

/// Errors raised by the MyFoodRepo client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Service error (HTTP {status}): {error}")]
    Service { status: u16, error: ServiceError },

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No session token, logout impossible")]
    NoSession,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build the error for a non-success response
    ///
    /// Bodies shaped like `{"error": {...}}` become `Service`; anything else
    /// is kept verbatim in `Status`.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ApiError::Service {
                status,
                error: parsed.error,
            },
            Err(_) => ApiError::Status {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Service error object, when the server sent one
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            ApiError::Service { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } | ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

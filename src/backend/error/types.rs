/**
 * Backend Error Types
 *
 * Errors raised while serving HTTP requests or assembling the server. Every
 * variant maps to an HTTP status code so handlers can return them directly.
 *
 * # Status Mapping
 *
 * - `HandlerError` - carries its own status
 * - `MalformedPayload` - 400, the request body was not JSON
 * - `Broker` - 503, the broadcast channel is unreachable or failed
 */

use crate::backend::realtime::BrokerError;
use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use chatcast::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::malformed("expected value at line 1 column 1");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Generic handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Request body is not well-formed JSON
    #[error("Malformed payload: {message}")]
    MalformedPayload {
        /// Parser diagnostic
        message: String,
    },

    /// Broadcast channel failure
    #[error(transparent)]
    Broker(#[from] BrokerError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a malformed payload error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            Self::Broker(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Human-readable error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::MalformedPayload { message } => format!("Malformed payload: {}", message),
            Self::Broker(err) => err.to_string(),
        }
    }
}

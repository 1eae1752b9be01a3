//! Client error types

use crate::shared::ConfigError;
use thiserror::Error;

/// Errors surfaced by the client session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response (connection refused, reset, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with something other than success
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Empty messages are never sent
    #[error("Message content is empty")]
    EmptyContent,

    /// Only failed messages can be resent
    #[error("Message {id} is not in a failed state")]
    NotResendable { id: String },

    #[error("Unknown message {id}")]
    UnknownMessage { id: String },

    /// Identity file could not be read or written
    #[error("Identity error: {0}")]
    Identity(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Identity(err.to_string())
    }
}

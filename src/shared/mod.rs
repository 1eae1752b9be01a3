//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and the server. These types travel over HTTP as JSON: the
//! publish endpoint receives them and the subscribe stream sends them back.

/// Message data structure
pub mod message;

/// Shared error types
pub mod error;

/// Configuration helpers
pub mod config;

/// Re-export commonly used types for convenience
pub use message::Message;
pub use error::SharedError;
pub use config::ConfigError;

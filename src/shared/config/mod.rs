//! Configuration helpers
//!
//! Both binaries read their settings from the environment (optionally
//! seeded from a `.env` file). This module holds the error type and the
//! small parsing helpers they share.

use std::str::FromStr;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Read an environment variable, treating blank values as unset
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a raw configuration value for `key`
pub fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

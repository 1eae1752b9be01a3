//! Client configuration

use crate::shared::config::env_var;
use crate::shared::ConfigError;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Where the client finds the server and its identity file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    server_url: String,
    identity_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            identity_path: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `server_url`
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidUrl` when the URL does not parse or is not
    /// http(s).
    pub fn new(server_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(server_url)
            .map_err(|_| ConfigError::InvalidUrl(server_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(server_url.to_string()));
        }

        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            identity_path: None,
        })
    }

    /// Load from `CLIENT_API_URL` and `CHATCAST_IDENTITY`
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_url = env_var("CLIENT_API_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let config = Self::new(&server_url)?;

        Ok(match env_var("CHATCAST_IDENTITY") {
            Some(path) => config.with_identity_path(path),
            None => config,
        })
    }

    /// Override where the identity file lives
    pub fn with_identity_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_path = Some(path.into());
        self
    }

    /// Server base URL without a trailing slash
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    /// URL of the chat endpoint (POST to publish, GET to subscribe)
    pub fn chat_url(&self) -> String {
        self.api_url("/api/chat")
    }

    pub fn identity_path(&self) -> Option<&Path> {
        self.identity_path.as_deref()
    }
}

//! Local identity
//!
//! Each client keeps a `{username, userId}` pair in a JSON file under the
//! user's config directory (`<config_dir>/chatcast/identity.json`). The
//! `userId` is generated once and never changes; the username can be edited.

use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::shared::message::generate_id;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Who this client is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub username: String,
}

impl Identity {
    /// Fresh identity with a newly generated user id
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            user_id: generate_id(),
            username: username.into(),
        }
    }
}

/// JSON file holding the identity
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/chatcast/identity.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chatcast").join("identity.json"))
    }

    /// Store at the configured path, falling back to the default location
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        config
            .identity_path()
            .map(Path::to_path_buf)
            .or_else(Self::default_path)
            .map(Self::new)
            .ok_or_else(|| ClientError::Identity("no config directory available".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored identity; `None` when no file exists yet
    pub fn load(&self) -> Result<Option<Identity>, ClientError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ClientError::Identity(format!("{}: {}", self.path.display(), e)))
    }

    /// Write `identity`, creating parent directories as needed
    pub fn save(&self, identity: &Identity) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(identity)
            .map_err(|e| ClientError::Identity(e.to_string()))?;
        std::fs::write(&self.path, json)?;

        tracing::debug!("[Client] Identity saved to {}", self.path.display());
        Ok(())
    }

    /// Load the identity, or create and save one named by `username`
    pub fn load_or_create<F>(&self, username: F) -> Result<Identity, ClientError>
    where
        F: FnOnce() -> String,
    {
        if let Some(identity) = self.load()? {
            return Ok(identity);
        }

        let identity = Identity::new(username());
        self.save(&identity)?;
        tracing::info!("[Client] Created identity {} ({})", identity.username, identity.user_id);
        Ok(identity)
    }
}

//! Publish client for `POST /api/chat`

use crate::client::error::ClientError;
use crate::shared::Message;
use reqwest::Client;

/// Sends messages to the publish endpoint
#[derive(Debug, Clone)]
pub struct Publisher {
    http: Client,
    url: String,
}

impl Publisher {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Publish `message` once
    ///
    /// # Errors
    ///
    /// * `ClientError::Transport` - no response was received
    /// * `ClientError::Status` - the server answered with a non-success status
    pub async fn publish(&self, message: &Message) -> Result<(), ClientError> {
        tracing::debug!("[Client] Publishing message {}", message.id);

        let response = self.http.post(&self.url).json(message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

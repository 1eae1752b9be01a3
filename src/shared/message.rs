/**
 * Message Data Structure
 *
 * This module defines the Message struct used for chat messages and its
 * JSON representation on the wire.
 *
 * The Message struct is shared between client and server. The client builds
 * it, the publish endpoint relays its JSON verbatim, and the subscribe stream
 * hands the same JSON back to every connected client.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SSE event name used for chat messages on the subscribe stream
pub const CHAT_EVENT: &str = "chat.message";

/// Represents a single chat message
///
/// Field names are camelCase on the wire (`userId`), matching what browser
/// clients send.
///
/// # Fields
/// * `id` - Client-generated unique id, the only dedup/replacement key
/// * `user_id` - Stable id of the sending session
/// * `username` - Display name at the time of sending
/// * `content` - Message text
/// * `date` - Creation time assigned by the sender
///
/// # Example
/// ```rust
/// use chatcast::shared::Message;
///
/// let message = Message::new("u1", "Alice", "Hello, world!");
/// assert_eq!(message.user_id, "u1");
/// assert!(!message.id.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message id
    pub id: String,
    /// Sender session id
    pub user_id: String,
    /// Sender display name
    pub username: String,
    /// Message text
    pub content: String,
    /// Creation timestamp (RFC3339 on the wire)
    ///
    /// Some publishers drop this field; such messages are stamped with the
    /// time they were decoded.
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

impl Message {
    /// Create a new message with a fresh id and the current timestamp
    ///
    /// # Arguments
    /// * `user_id` - The sender's session id
    /// * `username` - The sender's display name
    /// * `content` - The message text
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            user_id: user_id.into(),
            username: username.into(),
            content: content.into(),
            date: Utc::now(),
        }
    }

    /// Create a message with a caller-chosen id
    ///
    /// Used when the id is already known, e.g. when rebuilding a message
    /// that was created elsewhere.
    pub fn with_id(
        id: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ..Self::new(user_id, username, content)
        }
    }
}

/// Generate a fresh message id
///
/// UUID v4 in simple (hyphen-less) form.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

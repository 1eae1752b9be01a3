//! # Chat Session
//!
//! One client's view of the chat: its identity, the draft being typed, and
//! the reconciled message list.
//!
//! Sending is optimistic. The message is appended to the list as `Pending`
//! before the publish request goes out; the request runs on its own task and
//! marks the message `Confirmed` or `Failed` when it returns. Whatever the
//! publish outcome, the server's copy eventually arrives on the stream and
//! replaces the local one by id.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chatcast::client::{ChatSession, ClientConfig, Identity};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = ChatSession::new(&ClientConfig::default(), Identity::new("alice"));
//! let listener = session.connect();
//!
//! session.set_draft("hello");
//! let ticket = session.send()?;
//! let delivery = ticket.delivered().await;
//!
//! for row in session.render() {
//!     println!("{}", row.to_line(80));
//! }
//! listener.close();
//! # Ok(())
//! # }
//! ```

use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::identity::Identity;
use crate::client::publisher::Publisher;
use crate::client::render::{render, RenderedMessage};
use crate::client::store::{Delivery, MessageList, MessageStore};
use crate::client::stream::{StreamHandle, StreamListener};
use crate::shared::{Message, SharedError};
use reqwest::Client;
use tokio::task::JoinHandle;

/// Pending outcome of one publish attempt
#[derive(Debug)]
pub struct SendTicket {
    id: String,
    handle: JoinHandle<Delivery>,
}

impl SendTicket {
    /// Id of the message being published
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait for the publish call and return the resulting delivery state
    ///
    /// `Echoed` when the stream copy arrived first.
    pub async fn delivered(self) -> Delivery {
        self.handle.await.unwrap_or(Delivery::Failed)
    }
}

/// A client's chat session
#[derive(Debug)]
pub struct ChatSession {
    identity: Identity,
    draft: String,
    store: MessageStore,
    publisher: Publisher,
    listener: StreamListener,
    chat_url: String,
}

impl ChatSession {
    pub fn new(config: &ClientConfig, identity: Identity) -> Self {
        Self::with_client(config, identity, Client::new())
    }

    /// Session sharing an existing HTTP client
    pub fn with_client(config: &ClientConfig, identity: Identity, http: Client) -> Self {
        let chat_url = config.chat_url();
        Self {
            identity,
            draft: String::new(),
            store: MessageStore::new(),
            publisher: Publisher::new(http.clone(), chat_url.clone()),
            listener: StreamListener::new(http),
            chat_url,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Change the display name used for future messages
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.identity.username = username.into();
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Current message list
    pub fn messages(&self) -> MessageList {
        self.store.snapshot()
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether the draft may be sent
    pub fn can_send(&self) -> bool {
        !self.draft.is_empty()
    }

    /// Send the draft and clear it
    ///
    /// # Errors
    ///
    /// `ClientError::EmptyContent` when the draft is empty; the draft is
    /// left as it was.
    pub fn send(&mut self) -> Result<SendTicket, ClientError> {
        if !self.can_send() {
            return Err(ClientError::EmptyContent);
        }
        let content = std::mem::take(&mut self.draft);
        self.send_content(content)
    }

    /// Send `content` as a new message from this session
    pub fn send_content(&self, content: impl Into<String>) -> Result<SendTicket, ClientError> {
        let content = content.into();
        if content.is_empty() {
            return Err(ClientError::EmptyContent);
        }

        let message = Message::new(
            self.identity.user_id.clone(),
            self.identity.username.clone(),
            content,
        );
        Ok(self.submit(message))
    }

    /// Insert `message` optimistically and publish it
    pub fn submit(&self, message: Message) -> SendTicket {
        self.store.update(|list| list.insert_local(message.clone()));
        self.spawn_publish(message)
    }

    /// Publish a failed message again with the identical payload
    ///
    /// # Errors
    ///
    /// * `ClientError::UnknownMessage` - no message with this id
    /// * `ClientError::NotResendable` - the message has not failed
    pub fn resend(&self, id: &str) -> Result<SendTicket, ClientError> {
        let list = self.store.snapshot();
        let entry = list.get(id).ok_or_else(|| ClientError::UnknownMessage { id: id.to_string() })?;
        if !entry.is_failed() {
            return Err(ClientError::NotResendable { id: id.to_string() });
        }

        let message = entry.message.clone();
        self.store.update(|list| list.mark_pending(id));
        tracing::info!("[Client] Resending message {}", id);
        Ok(self.spawn_publish(message))
    }

    /// Resend every failed message
    pub fn resend_failed(&self) -> Vec<SendTicket> {
        self.store
            .snapshot()
            .failed_ids()
            .iter()
            .filter_map(|id| self.resend(id).ok())
            .collect()
    }

    /// Merge one `chat.message` event's data into the list
    ///
    /// Malformed data is logged and dropped; the list is unchanged.
    pub fn receive(&self, data: &str) -> Result<(), SharedError> {
        receive_into(&self.store, data)
    }

    /// Open the stream listener feeding this session
    pub fn connect(&self) -> StreamHandle {
        let store = self.store.clone();
        self.listener.open(self.chat_url.clone(), move |event| {
            // Errors are already logged in receive_into
            let _ = receive_into(&store, &event.data);
        })
    }

    /// View rows for the current list
    pub fn render(&self) -> Vec<RenderedMessage> {
        render(&self.store.snapshot(), &self.identity.user_id)
    }

    fn spawn_publish(&self, message: Message) -> SendTicket {
        let id = message.id.clone();
        let store = self.store.clone();
        let publisher = self.publisher.clone();

        let handle = tokio::spawn(async move {
            let result = publisher.publish(&message).await;
            if let Err(e) = &result {
                tracing::warn!("[Client] Publish of {} failed: {}", message.id, e);
            }

            store.update(|list| list.record_publish(&message.id, result.is_ok()));

            let delivery = store.snapshot().delivery(&message.id).unwrap_or(Delivery::Failed);
            if result.is_err() && delivery == Delivery::Echoed {
                tracing::info!("[Client] Message {} was already echoed, keeping it delivered", message.id);
            }
            delivery
        });

        SendTicket { id, handle }
    }
}

fn receive_into(store: &MessageStore, data: &str) -> Result<(), SharedError> {
    let message: Message = serde_json::from_str(data).map_err(|e| {
        tracing::warn!("[Client] Dropping malformed chat event: {}", e);
        SharedError::from(e)
    })?;

    tracing::debug!("[Client] Received message {}", message.id);
    store.update(|list| list.upsert_echo(message));
    Ok(())
}

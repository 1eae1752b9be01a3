//! Client Module
//!
//! Everything a chat client needs to talk to the relay.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs       - Module exports and documentation
//! ├── config.rs    - Server URL and identity path
//! ├── error.rs     - ClientError
//! ├── identity.rs  - Persisted {username, userId}
//! ├── store.rs     - Immutable message list and its observable holder
//! ├── publisher.rs - POST /api/chat
//! ├── stream.rs    - SSE decoder and reconnecting stream listener
//! ├── session.rs   - Optimistic send, resend and echo reconciliation
//! ├── render.rs    - View rows for the message list
//! ├── command.rs   - Terminal input commands
//! └── main.rs      - Terminal client binary
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod identity;
pub mod publisher;
pub mod render;
pub mod session;
pub mod store;
pub mod stream;

pub use command::Command;
pub use config::ClientConfig;
pub use error::ClientError;
pub use identity::{Identity, IdentityStore};
pub use publisher::Publisher;
pub use render::{render, Alignment, RenderedMessage};
pub use session::{ChatSession, SendTicket};
pub use store::{Delivery, Entry, MessageList, MessageStore};
pub use stream::{ConnectionStatus, SseDecoder, SseEvent, StreamHandle, StreamListener};

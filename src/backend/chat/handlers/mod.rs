//! Chat Handlers Module
//!
//! Axum handlers for the chat endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Module exports and documentation
//! ├── publish.rs      - POST /api/chat, relay one message
//! ├── subscription.rs - GET /api/chat, SSE stream of relayed messages
//! └── hello.rs        - GET /api/hello, demo stream
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chatcast::backend::chat::handlers::{handle_chat_publish, handle_chat_subscription};
//! use chatcast::backend::server::AppState;
//! use axum::{routing::get, Router};
//!
//! # fn example() -> Router<AppState> {
//! Router::new().route("/api/chat", get(handle_chat_subscription).post(handle_chat_publish))
//! # }
//! ```

/// Publish handler
pub mod publish;

/// SSE subscription handler
pub mod subscription;

/// Demo stream handler
pub mod hello;

pub use hello::handle_hello;
pub use publish::handle_chat_publish;
pub use subscription::{format_chat_event, handle_chat_subscription};

//! Chatcast - Main Library
//!
//! Chatcast is a small real-time chat relay. Clients publish messages over a
//! plain HTTP call, the server pushes them onto a single pub/sub topic, and
//! every connected client receives them back over a Server-Sent Events
//! stream, including the sender's own copy.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and server
//!   - The `Message` entity and its JSON shape
//!   - Shared error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature)
//!   - Axum HTTP server with the publish and subscribe endpoints
//!   - Pluggable broadcast brokers (in-process or Redis)
//!
//! - **`client`** - Client session logic
//!   - Optimistic send, failure marking and resend
//!   - SSE stream listener and echo reconciliation
//!   - Rendering of the message list for a terminal UI
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend module and the server binary
//! - **`redis-broker`** - Enables the Redis pub/sub broker backend
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use chatcast::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! ## Client-Side
//!
//! ```rust,no_run
//! use chatcast::client::{ChatSession, ClientConfig, Identity};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let session = ChatSession::new(&config, Identity::new("alice"));
//! let listener = session.connect();
//! let ticket = session.send_content("hello")?;
//! ticket.delivered().await;
//! listener.close();
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - **Server**: handlers share only the broker handle (`Arc<dyn Broker>`)
//!   and the immutable configuration
//! - **Client**: the message list is an immutable value swapped atomically
//!   through a `tokio::sync::watch` channel
/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Client session, stream listener and rendering
pub mod client;

//! Backend Module
//!
//! All server-side code for the chat relay: an Axum HTTP server that
//! accepts messages on `POST /api/chat`, pushes them onto a broadcast
//! topic, and streams that topic to every client connected to
//! `GET /api/chat`.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs     - Module exports and documentation
//! ├── server/    - Configuration, state and app creation
//! ├── routes/    - Route configuration
//! ├── chat/      - Publish, subscribe and demo handlers
//! ├── realtime/  - Broker trait, backends and subscriptions
//! └── error/     - Error types and HTTP conversion
//! ```
//!
//! # State Management
//!
//! The server keeps no chat state. `AppState` carries only the broker handle
//! and the configuration; every message lives in the broker for as long as
//! it takes to fan it out.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatcast::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::default()).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat HTTP handlers
pub mod chat;

/// Broadcast channel brokers
pub mod realtime;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use realtime::{Broker, BrokerError, MemoryBroker};
pub use server::{create_app, create_app_with_broker, AppState, ServerConfig};

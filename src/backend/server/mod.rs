//! Server Module
//!
//! Configuration, shared state and assembly of the Axum application.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - ServerConfig, builder and environment loading
//! └── init.rs   - Broker selection and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env()`
//! 2. **Broker Creation**: memory or Redis, per `BROKER`
//! 3. **Router Creation**: routes, static files and tracing layer
//!
//! # Example
//!
//! ```rust,no_run
//! use chatcast::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{BrokerKind, ServerConfig};
pub use init::{create_app, create_app_with_broker};
pub use state::AppState;

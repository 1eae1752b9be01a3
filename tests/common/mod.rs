//! Common test utilities and helpers
//!
//! - A broker that can be switched offline
//! - A real server bound to an ephemeral port
//! - An SSE reader with timeouts
//! - Message fixtures

#![allow(dead_code)]

#[cfg(feature = "ssr")]
pub mod broker;
pub mod fixtures;
#[cfg(feature = "ssr")]
pub mod server;

#[cfg(feature = "ssr")]
pub use broker::*;
pub use fixtures::*;
#[cfg(feature = "ssr")]
pub use server::*;
#[cfg(feature = "ssr")]
pub use sse::*;

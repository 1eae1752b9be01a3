//! Integration tests
//!
//! - `api` - request/response endpoints through axum-test
//! - `realtime` - the SSE stream over a real socket
//! - `client` - the client session against mock and real servers

pub mod client;
#[cfg(feature = "ssr")]
pub mod realtime;

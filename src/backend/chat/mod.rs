//! Chat Module
//!
//! The relay's HTTP surface: publishing a message to the broadcast channel
//! and streaming the channel back to every connected client. The server
//! keeps no message history; a message exists on the server only while it
//! is in flight through the broker.

/// HTTP handlers for chat endpoints
pub mod handlers;

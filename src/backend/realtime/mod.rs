//! Real-time Broadcast Module
//!
//! The broadcast channel that carries chat payloads from the publish
//! endpoint to every open subscribe stream.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broker.rs       - `Broker` trait and `BrokerError`
//! ├── broadcast.rs    - In-process broker (tokio broadcast channels)
//! ├── redis.rs        - Redis pub/sub broker (`redis-broker` feature)
//! └── subscription.rs - Per-connection subscription and release tracking
//! ```
//!
//! # Backends
//!
//! `MemoryBroker` is the default and needs nothing external; it fans out
//! within one server process. `RedisBroker` relays through a Redis topic so
//! several server processes can share one chat.

/// Broker trait and errors
pub mod broker;

/// In-process broadcast broker
pub mod broadcast;

/// Per-connection subscriptions
pub mod subscription;

/// Redis broker
#[cfg(feature = "redis-broker")]
pub mod redis;

pub use broadcast::MemoryBroker;
pub use broker::{Broker, BrokerError};
pub use subscription::{Subscription, SubscriptionTracker};

#[cfg(feature = "redis-broker")]
pub use self::redis::RedisBroker;

/**
 * Broker Abstraction
 *
 * The broadcast channel is an external collaborator: a named topic that any
 * number of publishers write opaque JSON payloads to and any number of
 * subscribers read them from. This module defines the seam the HTTP
 * handlers talk to, so the backing implementation (in-process or Redis) is
 * chosen by configuration.
 *
 * # Contract
 *
 * - `publish` makes exactly one attempt and reports success or failure
 * - `subscribe` returns a dedicated `Subscription`; it is never shared
 *   between two client connections
 * - payloads published before a subscription exists are not replayed
 * - per publisher, a subscriber sees payloads in publish order
 */

use crate::backend::realtime::subscription::Subscription;
use async_trait::async_trait;
use thiserror::Error;

/// Broker failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// The broker cannot be reached at all
    #[error("Broker unavailable: {0}")]
    Unavailable(String),

    /// The publish call reached the broker but failed
    #[error("Publish failed: {0}")]
    Publish(String),

    /// A subscription could not be established
    #[error("Subscribe failed: {0}")]
    Subscribe(String),
}

/// A pub/sub backend carrying chat payloads
#[async_trait]
pub trait Broker: Send + Sync {
    /// Publish `payload` on `topic`
    ///
    /// Returns the number of subscribers the broker reports as having
    /// received the payload (0 when nobody is listening).
    async fn publish(&self, topic: &str, payload: &str) -> Result<usize, BrokerError>;

    /// Open a dedicated subscription to `topic`
    ///
    /// The subscription is released when the returned value is dropped.
    async fn subscribe(&self, topic: &str) -> Result<Subscription, BrokerError>;

    /// Number of subscriptions currently held open through this broker
    fn active_subscriptions(&self) -> usize;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

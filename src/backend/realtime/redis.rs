//! Redis broker backend
//!
//! Publishes go through a shared `ConnectionManager`, which reconnects on
//! its own. Each subscription opens its own pub/sub connection; the
//! connection lives inside the returned `Subscription` and is closed when
//! that subscription is dropped.

use crate::backend::realtime::broker::{Broker, BrokerError};
use crate::backend::realtime::subscription::{Subscription, SubscriptionTracker};
use async_trait::async_trait;
use futures_util::StreamExt;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;

/// Broker backed by Redis PUBLISH / SUBSCRIBE
pub struct RedisBroker {
    client: Client,
    publisher: RwLock<Option<ConnectionManager>>,
    tracker: SubscriptionTracker,
}

impl RedisBroker {
    /// Create a broker for `url` and verify the server is reachable
    pub async fn connect(url: &str) -> Result<Self, BrokerError> {
        let client = Client::open(url)
            .map_err(|e| BrokerError::Unavailable(format!("Invalid Redis URL: {}", e)))?;

        let broker = Self {
            client,
            publisher: RwLock::new(None),
            tracker: SubscriptionTracker::new(),
        };
        broker.publisher().await?;

        tracing::info!("[Realtime] Connected to Redis broker");
        Ok(broker)
    }

    /// Shared publish connection, created on first use
    async fn publisher(&self) -> Result<ConnectionManager, BrokerError> {
        if let Some(manager) = self.publisher.read().await.as_ref() {
            return Ok(manager.clone());
        }

        let mut slot = self.publisher.write().await;
        if let Some(manager) = slot.as_ref() {
            return Ok(manager.clone());
        }

        let manager = self
            .client
            .get_tokio_connection_manager()
            .await
            .map_err(|e| BrokerError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;
        *slot = Some(manager.clone());
        Ok(manager)
    }
}

#[async_trait]
impl Broker for RedisBroker {
    async fn publish(&self, topic: &str, payload: &str) -> Result<usize, BrokerError> {
        let mut conn = self.publisher().await?;
        let receivers: usize = conn
            .publish(topic, payload)
            .await
            .map_err(|e| BrokerError::Publish(e.to_string()))?;

        tracing::debug!(
            "[Realtime] Payload published on '{}' to {} Redis subscribers",
            topic,
            receivers
        );
        Ok(receivers)
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription, BrokerError> {
        let conn = self
            .client
            .get_async_connection()
            .await
            .map_err(|e| BrokerError::Unavailable(e.to_string()))?;

        let mut pubsub = conn.into_pubsub();
        pubsub
            .subscribe(topic)
            .await
            .map_err(|e| BrokerError::Subscribe(e.to_string()))?;

        let topic_name = topic.to_string();
        let payloads = pubsub.into_on_message().filter_map(move |msg| {
            let payload = match msg.get_payload::<String>() {
                Ok(payload) => Some(payload),
                Err(e) => {
                    tracing::warn!(
                        "[Realtime] Dropping non-text payload on '{}': {}",
                        topic_name,
                        e
                    );
                    None
                }
            };
            futures_util::future::ready(payload)
        });

        Ok(Subscription::new(
            topic,
            Box::pin(payloads),
            self.tracker.acquire(topic),
        ))
    }

    fn active_subscriptions(&self) -> usize {
        self.tracker.active()
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/**
 * In-process Broadcasting
 *
 * `MemoryBroker` is the default broker. Each topic is a
 * `tokio::sync::broadcast` channel, a multi-producer, multi-consumer channel
 * where every receiver gets a copy of each payload sent after it subscribed.
 *
 * # Lagging receivers
 *
 * The channel has a fixed capacity. A subscriber that falls behind by more
 * than that loses the oldest payloads; the subscription logs the gap and
 * keeps going instead of being disconnected.
 */

use crate::backend::realtime::broker::{Broker, BrokerError};
use crate::backend::realtime::subscription::{Subscription, SubscriptionTracker};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

/// Default per-topic channel capacity
pub const DEFAULT_CAPACITY: usize = 1000;

/// Broker backed by in-process broadcast channels
#[derive(Debug)]
pub struct MemoryBroker {
    capacity: usize,
    topics: Mutex<HashMap<String, broadcast::Sender<String>>>,
    tracker: SubscriptionTracker,
}

impl MemoryBroker {
    /// Create a broker whose topics buffer up to `capacity` payloads
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            topics: Mutex::new(HashMap::new()),
            tracker: SubscriptionTracker::new(),
        }
    }

    /// Get or create the sender for `topic`
    fn sender(&self, topic: &str) -> broadcast::Sender<String> {
        // A panic while holding the lock cannot leave the map half-updated
        let mut topics = self
            .topics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}

impl Default for MemoryBroker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl Broker for MemoryBroker {
    async fn publish(&self, topic: &str, payload: &str) -> Result<usize, BrokerError> {
        match self.sender(topic).send(payload.to_string()) {
            Ok(subscriber_count) => {
                tracing::debug!(
                    "[Realtime] Payload broadcast on '{}' to {} subscribers",
                    topic,
                    subscriber_count
                );
                Ok(subscriber_count)
            }
            Err(_) => {
                // No receivers is not a failure; the payload simply has no audience
                tracing::debug!("[Realtime] No subscribers on '{}'", topic);
                Ok(0)
            }
        }
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription, BrokerError> {
        let receiver = self.sender(topic).subscribe();
        let topic_name = topic.to_string();

        let payloads = BroadcastStream::new(receiver).filter_map(move |item| {
            let result = match item {
                Ok(payload) => Some(payload),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Realtime] Subscriber on '{}' lagged, skipped {} payloads",
                        topic_name,
                        skipped
                    );
                    None
                }
            };
            futures_util::future::ready(result)
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
        "memory"
    }
}

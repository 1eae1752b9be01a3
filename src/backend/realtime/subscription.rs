/**
 * Broker Subscriptions
 *
 * A `Subscription` is the per-connection handle onto a broker topic. It is a
 * `Stream` of raw payload strings and owns whatever the backend needs to keep
 * the subscription alive (a broadcast receiver, a dedicated Redis
 * connection, ...).
 *
 * # Release
 *
 * Every subscription carries a `SubscriptionGuard` registered with the
 * broker's `SubscriptionTracker`. Dropping the subscription drops the
 * backend resources and the guard together, so the tracker's count always
 * reflects the subscriptions that are really open. The subscribe endpoint
 * moves the subscription into the response body, which means a client
 * disconnect releases it.
 */

use futures_util::Stream;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Boxed stream of raw payloads produced by a broker backend
pub type PayloadStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Counts open subscriptions for one broker
#[derive(Debug, Clone, Default)]
pub struct SubscriptionTracker {
    active: Arc<AtomicUsize>,
}

impl SubscriptionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscription on `topic`
    pub fn acquire(&self, topic: &str) -> SubscriptionGuard {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            "[Realtime] Subscription opened on '{}' ({} active)",
            topic,
            active
        );
        SubscriptionGuard {
            topic: topic.to_string(),
            active: self.active.clone(),
        }
    }

    /// Number of live subscriptions
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Decrements the tracker when dropped
#[derive(Debug)]
pub struct SubscriptionGuard {
    topic: String,
    active: Arc<AtomicUsize>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        let remaining = self.active.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        tracing::info!(
            "[Realtime] Subscription released on '{}' ({} active)",
            self.topic,
            remaining
        );
    }
}

/// A dedicated subscription to one broker topic
pub struct Subscription {
    topic: String,
    payloads: PayloadStream,
    _guard: SubscriptionGuard,
}

impl Subscription {
    pub fn new(topic: impl Into<String>, payloads: PayloadStream, guard: SubscriptionGuard) -> Self {
        Self {
            topic: topic.into(),
            payloads,
            _guard: guard,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Stream for Subscription {
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.get_mut().payloads.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}

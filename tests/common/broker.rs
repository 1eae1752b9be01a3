//! Broker wrapper whose availability can be toggled

use async_trait::async_trait;
use chatcast::backend::realtime::{Broker, BrokerError, MemoryBroker, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory broker that fails every call while offline
///
/// Subscriptions opened while online keep working when it goes offline,
/// like existing Redis connections surviving a publish-side outage.
#[derive(Debug, Default)]
pub struct SwitchableBroker {
    inner: MemoryBroker,
    offline: AtomicBool,
}

impl SwitchableBroker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_online(&self, online: bool) {
        self.offline.store(!online, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), BrokerError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(BrokerError::Unavailable("broker offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Broker for SwitchableBroker {
    async fn publish(&self, topic: &str, payload: &str) -> Result<usize, BrokerError> {
        self.check()?;
        self.inner.publish(topic, payload).await
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription, BrokerError> {
        self.check()?;
        self.inner.subscribe(topic).await
    }

    fn active_subscriptions(&self) -> usize {
        self.inner.active_subscriptions()
    }

    fn name(&self) -> &'static str {
        "switchable"
    }
}

/// Wait until `broker` reports exactly `expected` live subscriptions
pub async fn wait_for_subscriptions(broker: &dyn Broker, expected: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while broker.active_subscriptions() != expected {
        if tokio::time::Instant::now() > deadline {
            panic!(
                "expected {} subscriptions, found {}",
                expected,
                broker.active_subscriptions()
            );
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

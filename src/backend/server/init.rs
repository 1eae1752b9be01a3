/**
 * Server Initialization
 *
 * Builds the broker selected by configuration and assembles the router.
 *
 * # Initialization Process
 *
 * 1. Create the broker (`MemoryBroker`, or `RedisBroker` with the
 *    `redis-broker` feature)
 * 2. Wrap broker and configuration in `AppState`
 * 3. Create the router with all routes
 */

use crate::backend::error::BackendError;
use crate::backend::realtime::{Broker, MemoryBroker};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{BrokerKind, ServerConfig};
use crate::backend::server::state::AppState;
use axum::Router;
use std::sync::Arc;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the configured broker cannot be created, e.g. Redis is
/// unreachable or was requested in a build without Redis support.
pub async fn create_app(config: ServerConfig) -> Result<Router, BackendError> {
    tracing::info!("[Server] Initializing chat relay on topic '{}'", config.topic);

    let broker = load_broker(&config).await?;
    Ok(create_app_with_broker(config, broker))
}

/// Assemble the application around an existing broker
pub fn create_app_with_broker(config: ServerConfig, broker: Arc<dyn Broker>) -> Router {
    tracing::info!("[Server] Using {} broker", broker.name());
    create_router(AppState::new(config, broker))
}

/// Create the broker described by `config`
pub async fn load_broker(config: &ServerConfig) -> Result<Arc<dyn Broker>, BackendError> {
    match &config.broker {
        BrokerKind::Memory => Ok(Arc::new(MemoryBroker::new(config.broadcast_capacity))),
        BrokerKind::Redis { url } => connect_redis(url).await,
    }
}

#[cfg(feature = "redis-broker")]
async fn connect_redis(url: &str) -> Result<Arc<dyn Broker>, BackendError> {
    let broker = crate::backend::realtime::RedisBroker::connect(url).await?;
    Ok(Arc::new(broker))
}

#[cfg(not(feature = "redis-broker"))]
async fn connect_redis(_url: &str) -> Result<Arc<dyn Broker>, BackendError> {
    Err(BackendError::Broker(
        crate::backend::realtime::BrokerError::Unavailable(
            "Redis support not compiled in; rebuild with --features redis-broker".to_string(),
        ),
    ))
}

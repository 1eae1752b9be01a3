/**
 * Application State Management
 *
 * `AppState` is the only state shared between request handlers: the broker
 * handle and the configuration. Both sit behind `Arc`, so cloning the state
 * per request is cheap.
 *
 * # State Extraction
 *
 * `FromRef` implementations let handlers extract just the part they need,
 * e.g. `State(broker): State<Arc<dyn Broker>>`.
 */

use crate::backend::realtime::Broker;
use crate::backend::server::config::ServerConfig;
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Broadcast channel every handler publishes to or subscribes from
    pub broker: Arc<dyn Broker>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, broker: Arc<dyn Broker>) -> Self {
        Self {
            broker,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<dyn Broker> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.broker.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("broker", &self.broker.name())
            .field("config", &self.config)
            .finish()
    }
}

/**
 * Server Configuration
 *
 * Settings for the chat relay, read from the environment once at startup
 * (a `.env` file is honoured by the binary before this runs).
 *
 * # Variables
 *
 * | Variable             | Default          |
 * |----------------------|------------------|
 * | `SERVER_HOST`        | `0.0.0.0`        |
 * | `SERVER_PORT`        | `3000`           |
 * | `CHAT_TOPIC`         | `streaming-chat` |
 * | `BROKER`             | `memory`         |
 * | `REDIS_URL`          | required for `BROKER=redis` |
 * | `BROADCAST_CAPACITY` | `1000`           |
 * | `KEEP_ALIVE_SECS`    | `15`             |
 * | `STATIC_DIR`         | `public`         |
 */

use crate::shared::config::{env_var, parse_value};
use crate::shared::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TOPIC: &str = "streaming-chat";
pub const DEFAULT_CAPACITY: usize = 1000;
pub const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(15);
pub const DEFAULT_HELLO_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Which broker backend carries the chat topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerKind {
    /// In-process broadcast channels
    Memory,
    /// Redis pub/sub at `url`
    Redis { url: String },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Broker topic every chat message is published on
    pub topic: String,
    pub broker: BrokerKind,
    /// Per-topic buffer of the in-process broker
    pub broadcast_capacity: usize,
    /// Idle interval between keep-alive comments on the subscribe stream
    pub keep_alive: Duration,
    /// Tick interval of the hello demo stream
    pub hello_interval: Duration,
    /// Directory served for non-API paths
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(host) = lookup("SERVER_HOST") {
            builder = builder.host(host);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(topic) = lookup("CHAT_TOPIC") {
            builder = builder.topic(topic);
        }
        if let Some(capacity) = lookup("BROADCAST_CAPACITY") {
            builder = builder.broadcast_capacity(parse_value("BROADCAST_CAPACITY", &capacity)?);
        }
        if let Some(secs) = lookup("KEEP_ALIVE_SECS") {
            let secs: u64 = parse_value("KEEP_ALIVE_SECS", &secs)?;
            builder = builder.keep_alive(Duration::from_secs(secs));
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }

        let broker = match lookup("BROKER").map(|kind| kind.to_ascii_lowercase()) {
            None => BrokerKind::Memory,
            Some(kind) if kind == "memory" => BrokerKind::Memory,
            Some(kind) if kind == "redis" => BrokerKind::Redis {
                url: lookup("REDIS_URL").ok_or(ConfigError::MissingValue("REDIS_URL"))?,
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "BROKER",
                    value: other,
                })
            }
        };

        builder.broker(broker).build()
    }

    /// Address string to bind the listener to
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            topic: DEFAULT_TOPIC.to_string(),
            broker: BrokerKind::Memory,
            broadcast_capacity: DEFAULT_CAPACITY,
            keep_alive: DEFAULT_KEEP_ALIVE,
            hello_interval: DEFAULT_HELLO_INTERVAL,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Builder for [`ServerConfig`]
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.config.topic = topic.into();
        self
    }

    pub fn broker(mut self, broker: BrokerKind) -> Self {
        self.config.broker = broker;
        self
    }

    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.config.broadcast_capacity = capacity;
        self
    }

    pub fn keep_alive(mut self, interval: Duration) -> Self {
        self.config.keep_alive = interval;
        self
    }

    pub fn hello_interval(mut self, interval: Duration) -> Self {
        self.config.hello_interval = interval;
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    /// Validate and produce the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let config = self.config;

        if config.topic.trim().is_empty() {
            return Err(ConfigError::MissingValue("CHAT_TOPIC"));
        }
        if config.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "BROADCAST_CAPACITY",
                value: "0".to_string(),
            });
        }
        if config.keep_alive.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "KEEP_ALIVE_SECS",
                value: "0".to_string(),
            });
        }
        if let BrokerKind::Redis { url } = &config.broker {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }

        Ok(config)
    }
}

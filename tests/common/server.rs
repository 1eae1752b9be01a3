//! Real server on an ephemeral port
//!
//! Streaming endpoints are exercised over a real socket so that client
//! disconnects behave as they do in production.

use chatcast::backend::realtime::Broker;
use chatcast::backend::server::{create_app_with_broker, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const TEST_TOPIC: &str = "test-chat";

/// Configuration with short timers for tests
pub fn test_config() -> ServerConfig {
    ServerConfig::builder()
        .host("127.0.0.1")
        .port(0)
        .topic(TEST_TOPIC)
        .keep_alive(Duration::from_millis(100))
        .hello_interval(Duration::from_millis(1))
        .static_dir("tests/no-static-files")
        .build()
        .expect("test config is valid")
}

/// A running server
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn chat_url(&self) -> String {
        self.url("/api/chat")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve the app around `broker` on 127.0.0.1 with an OS-assigned port
pub async fn spawn_server(broker: Arc<dyn Broker>) -> TestServer {
    let app = create_app_with_broker(test_config(), broker);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    TestServer { addr, handle }
}

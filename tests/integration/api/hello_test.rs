//! `GET /api/hello`

use crate::common::test_config;
use axum_test::TestServer;
use chatcast::backend::realtime::MemoryBroker;
use chatcast::backend::server::create_app_with_broker;
use std::sync::Arc;

#[tokio::test]
async fn test_hello_stream_body_and_headers() {
    let app = create_app_with_broker(test_config(), Arc::new(MemoryBroker::default()));
    let server = TestServer::new(app).expect("test server");

    let response = server.get("/api/hello").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/event-stream");
    assert_eq!(response.header("cache-control"), "no-cache, no-transform");

    let mut expected = String::from("Hello, world!");
    for n in 1..=10 {
        expected.push_str(&format!("\n{} mississippi", n));
    }
    expected.push_str("\nThat's all, folks!");

    response.assert_text(expected);
}

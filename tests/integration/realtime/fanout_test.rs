//! Fan-out, ordering and isolation of the subscribe stream

use crate::common::{payload, spawn_server, wait_for_subscriptions, EventReader, TEST_TOPIC};
use chatcast::backend::realtime::{Broker, MemoryBroker};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

const QUIET: Duration = Duration::from_millis(300);

async fn publish(url: &str, body: String) {
    let response = reqwest::Client::new()
        .post(url)
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("publish request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn test_every_subscriber_gets_each_message_once() {
    let broker = Arc::new(MemoryBroker::default());
    let server = spawn_server(broker.clone()).await;

    let mut readers = Vec::new();
    for _ in 0..3 {
        readers.push(EventReader::open(&server.chat_url()).await);
    }
    wait_for_subscriptions(broker.as_ref(), 3).await;

    publish(&server.chat_url(), payload("x1", "hi")).await;

    for reader in readers.iter_mut() {
        let event = reader.next_event().await;
        assert_eq!(event.id.as_deref(), Some("x1"));
        assert_eq!(event.event, "chat.message");
        assert_eq!(event.data, payload("x1", "hi"));
        assert!(reader.stays_quiet(QUIET).await, "delivered more than once");
    }
}

#[tokio::test]
async fn test_subscriber_sees_nothing_published_before_it_connected() {
    let broker = Arc::new(MemoryBroker::default());
    let server = spawn_server(broker.clone()).await;

    let mut early = EventReader::open(&server.chat_url()).await;
    wait_for_subscriptions(broker.as_ref(), 1).await;
    publish(&server.chat_url(), payload("before", "1")).await;
    assert_eq!(early.next_event().await.id.as_deref(), Some("before"));

    let mut late = EventReader::open(&server.chat_url()).await;
    wait_for_subscriptions(broker.as_ref(), 2).await;
    publish(&server.chat_url(), payload("after", "2")).await;

    assert_eq!(late.next_event().await.id.as_deref(), Some("after"));
    assert!(late.stays_quiet(QUIET).await);
}

#[tokio::test]
async fn test_messages_arrive_in_publish_order() {
    let broker = Arc::new(MemoryBroker::default());
    let server = spawn_server(broker.clone()).await;

    let mut reader = EventReader::open(&server.chat_url()).await;
    wait_for_subscriptions(broker.as_ref(), 1).await;

    let ids: Vec<String> = (0..10).map(|n| format!("m{}", n)).collect();
    for id in &ids {
        publish(&server.chat_url(), payload(id, "x")).await;
    }

    let mut received = Vec::new();
    for _ in &ids {
        received.push(reader.next_event().await.id.unwrap_or_default());
    }
    assert_eq!(received, ids);
}

#[tokio::test]
async fn test_malformed_payload_does_not_break_the_stream() {
    let broker = Arc::new(MemoryBroker::default());
    let server = spawn_server(broker.clone()).await;

    let mut first = EventReader::open(&server.chat_url()).await;
    let mut second = EventReader::open(&server.chat_url()).await;
    wait_for_subscriptions(broker.as_ref(), 2).await;

    // Straight onto the topic; the publish endpoint would reject these
    broker.publish(TEST_TOPIC, &payload("good1", "a")).await.unwrap();
    broker.publish(TEST_TOPIC, "definitely not json").await.unwrap();
    broker.publish(TEST_TOPIC, r#"{"content":"no id"}"#).await.unwrap();
    broker.publish(TEST_TOPIC, &payload("good2", "b")).await.unwrap();

    for reader in [&mut first, &mut second] {
        assert_eq!(reader.next_event().await.id.as_deref(), Some("good1"));
        assert_eq!(reader.next_event().await.id.as_deref(), Some("good2"));
    }
}

#[tokio::test]
async fn test_multiline_payload_is_reassembled() {
    let broker = Arc::new(MemoryBroker::default());
    let server = spawn_server(broker.clone()).await;

    let mut reader = EventReader::open(&server.chat_url()).await;
    wait_for_subscriptions(broker.as_ref(), 1).await;

    let pretty = serde_json::to_string_pretty(&serde_json::json!({"id": "x1", "content": "hi"})).unwrap();
    publish(&server.chat_url(), pretty.clone()).await;

    let event = reader.next_event().await;
    assert_eq!(event.data, pretty);
}

#[tokio::test]
async fn test_two_clients_scenario() {
    let broker = Arc::new(MemoryBroker::default());
    let server = spawn_server(broker.clone()).await;

    // B is already subscribed when A sends
    let mut b = EventReader::open(&server.chat_url()).await;
    wait_for_subscriptions(broker.as_ref(), 1).await;

    publish(&server.chat_url(), payload("x1", "hi")).await;

    let event = b.next_event().await;
    assert_eq!(event.event, "chat.message");
    let message: serde_json::Value = serde_json::from_str(&event.data).unwrap();
    assert_eq!(message["id"], "x1");
    assert_eq!(message["content"], "hi");
}

//! Optimistic send and resend against a mocked publish endpoint

use super::wait_for_list;
use crate::common::message;
use chatcast::client::{ChatSession, ClientConfig, Delivery, Identity};
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> ChatSession {
    let config = ClientConfig::new(&server.uri()).expect("mock server url");
    ChatSession::new(&config, Identity::new("alice"))
}

async fn publish_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/api/chat")
        .map(|request| serde_json::from_slice(&request.body).expect("json body"))
        .collect()
}

#[tokio::test]
async fn test_message_is_pending_until_publish_returns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK").set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    session.set_draft("hello");
    let ticket = session.send().unwrap();
    let id = ticket.id().to_string();

    assert_eq!(session.messages().delivery(&id), Some(Delivery::Pending));
    assert_eq!(ticket.delivered().await, Delivery::Confirmed);
    assert_eq!(session.messages().delivery(&id), Some(Delivery::Confirmed));
    assert!(session.messages().failed_ids().is_empty());
}

#[tokio::test]
async fn test_publish_body_is_camel_case_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let ticket = session.submit(message("x1", "hi"));
    assert_eq!(ticket.delivered().await, Delivery::Confirmed);

    let bodies = publish_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["id"], "x1");
    assert_eq!(bodies[0]["userId"], "u1");
    assert_eq!(bodies[0]["username"], "Alice");
    assert_eq!(bodies[0]["content"], "hi");
    assert!(bodies[0]["date"].is_string());
}

#[tokio::test]
async fn test_failed_publish_can_be_resent_with_identical_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(2)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let ticket = session.send_content("hi").unwrap();
    let id = ticket.id().to_string();

    assert_eq!(ticket.delivered().await, Delivery::Failed);
    assert_eq!(session.messages().failed_ids(), vec![id.clone()]);

    let retry = session.resend(&id).unwrap();
    assert_eq!(retry.id(), id);
    assert_eq!(retry.delivered().await, Delivery::Confirmed);

    let list = session.messages();
    assert_eq!(list.len(), 1);
    assert!(list.failed_ids().is_empty());

    let bodies = publish_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["id"], id.as_str());
}

#[tokio::test]
async fn test_echo_clears_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let ticket = session.submit(message("x1", "hi"));
    assert_eq!(ticket.delivered().await, Delivery::Failed);

    session.receive(&serde_json::to_string(&message("x1", "hi")).unwrap()).unwrap();

    let list = session.messages();
    assert_eq!(list.delivery("x1"), Some(Delivery::Echoed));
    assert!(list.failed_ids().is_empty());
    assert!(!session.render()[0].failed);
}

#[tokio::test]
async fn test_failure_does_not_block_later_sends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(2)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let first = session.submit(message("x1", "one"));
    assert_eq!(first.delivered().await, Delivery::Failed);

    let second = session.submit(message("x2", "two"));
    assert_eq!(second.delivered().await, Delivery::Confirmed);

    let list = wait_for_list(session.store(), |list| list.len() == 2).await;
    assert_eq!(list.ids(), vec!["x1", "x2"]);
    assert_eq!(list.failed_ids(), vec!["x1".to_string()]);
}

#[tokio::test]
async fn test_resend_failed_retries_every_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(2)
        .mount(&server)
        .await;

    let session = session_for(&server);
    for id in ["x1", "x2"] {
        assert_eq!(session.submit(message(id, "hi")).delivered().await, Delivery::Failed);
    }

    let tickets = session.resend_failed();
    assert_eq!(tickets.len(), 2);
    for ticket in tickets {
        assert_eq!(ticket.delivered().await, Delivery::Confirmed);
    }
    assert!(session.messages().failed_ids().is_empty());
}

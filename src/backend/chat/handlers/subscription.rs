/**
 * Chat Subscription Handler
 *
 * `GET /api/chat` opens a Server-Sent Events stream. Each connection gets
 * its own broker subscription, and every payload published after that
 * point is written as one event:
 *
 * ```text
 * id: x1
 * event: chat.message
 * retry: 10000
 * data: {"id":"x1","userId":"u1","username":"Alice","content":"hi",...}
 *
 * ```
 *
 * While idle, a `: keep-alive` comment is written on the configured
 * interval. Writing to a dead peer fails, which ends the body and releases
 * the subscription.
 *
 * # Ownership
 *
 * The subscription is moved into the response body stream. When hyper drops
 * the body (client closed, aborted, or server shutting down) the
 * subscription and its broker resources go with it. No other task holds a
 * reference to it.
 */

use crate::backend::error::BackendError;
use crate::backend::realtime::Subscription;
use crate::backend::server::state::AppState;
use crate::shared::message::CHAT_EVENT;
use crate::shared::SharedError;
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use bytes::Bytes;
use futures_util::{stream, Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Reconnect delay advertised to clients, in milliseconds
pub const RETRY_MS: u64 = 10_000;

/// SSE comment written while the stream is idle
pub const KEEP_ALIVE_FRAME: &[u8] = b": keep-alive\n\n";

/// Format one chat payload as an SSE event
///
/// The payload must be JSON with a string `id`; that id becomes the event
/// id. Line breaks inside the payload are split over several `data:` lines.
///
/// # Errors
///
/// Returns a `SharedError` when the payload is not JSON, has no string
/// `id`, or the id contains a line break.
pub fn format_chat_event(payload: &str) -> Result<Bytes, SharedError> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let id = value
        .get("id")
        .and_then(|id| id.as_str())
        .ok_or_else(|| SharedError::validation("id", "payload has no string id"))?;

    if id.contains(['\n', '\r']) {
        return Err(SharedError::validation("id", "id contains a line break"));
    }

    let mut frame = String::with_capacity(payload.len() + id.len() + 64);
    frame.push_str("id: ");
    frame.push_str(id);
    frame.push('\n');
    frame.push_str("event: ");
    frame.push_str(CHAT_EVENT);
    frame.push('\n');
    frame.push_str(&format!("retry: {}\n", RETRY_MS));

    let normalized = payload.replace("\r\n", "\n").replace('\r', "\n");
    for line in normalized.split('\n') {
        frame.push_str("data: ");
        frame.push_str(line);
        frame.push('\n');
    }
    frame.push('\n');

    Ok(Bytes::from(frame))
}

/// Turn a subscription into the SSE body stream
///
/// Malformed payloads are logged and skipped. The stream ends when the
/// subscription does.
pub fn chat_event_stream(
    subscription: Subscription,
    keep_alive: Duration,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    let mut ticker = interval_at(Instant::now() + keep_alive, keep_alive);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    stream::unfold(
        (subscription, ticker),
        |(mut subscription, mut ticker): (Subscription, Interval)| async move {
            loop {
                tokio::select! {
                    payload = subscription.next() => {
                        let Some(payload) = payload else {
                            tracing::info!(
                                "[Server] Subscription on '{}' ended, closing stream",
                                subscription.topic()
                            );
                            return None;
                        };

                        match format_chat_event(&payload) {
                            Ok(frame) => {
                                tracing::debug!("[Server] Forwarding chat event ({} bytes)", frame.len());
                                ticker.reset();
                                return Some((Ok(frame), (subscription, ticker)));
                            }
                            Err(e) => {
                                tracing::warn!("[Server] Skipping malformed payload: {}", e);
                            }
                        }
                    }
                    _ = ticker.tick() => {
                        tracing::debug!("[Server] Sending keep-alive");
                        return Some((
                            Ok(Bytes::from_static(KEEP_ALIVE_FRAME)),
                            (subscription, ticker),
                        ));
                    }
                }
            }
        },
    )
}

/// Handle `GET /api/chat`
///
/// # Errors
///
/// * `503 Service Unavailable` - the broker subscription could not be opened
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
/// Cache-Control: no-cache, no-transform
/// Connection: keep-alive
/// X-Accel-Buffering: no
/// ```
pub async fn handle_chat_subscription(
    State(app_state): State<AppState>,
) -> Result<Response<Body>, BackendError> {
    let topic = &app_state.config.topic;
    let subscription = app_state.broker.subscribe(topic).await.map_err(|e| {
        tracing::error!("[Server] Could not subscribe to '{}': {}", topic, e);
        e
    })?;

    tracing::info!("[Server] Chat stream opened on '{}'", topic);

    let body = Body::from_stream(chat_event_stream(
        subscription,
        app_state.config.keep_alive,
    ));

    event_stream_response(body)
}

/// Wrap a streaming body with the event-stream headers
pub(crate) fn event_stream_response(body: Body) -> Result<Response<Body>, BackendError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache, no-transform")
        .header(header::CONNECTION, "keep-alive")
        // Keeps nginx from buffering the stream
        .header("X-Accel-Buffering", "no")
        .body(body)
        .map_err(|e| {
            tracing::error!("[Server] Failed to build stream response: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to build stream response")
        })
}

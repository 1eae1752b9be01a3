/**
 * Chat Publish Handler
 *
 * `POST /api/chat` relays one chat message to the broadcast channel.
 *
 * The body is checked for well-formed JSON and nothing else; it is then
 * published byte-for-byte as UTF-8 text. The server never rewrites, dedups
 * or retries a message. Exactly one publish attempt is made per request.
 */

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode};
use serde::de::IgnoredAny;

/// Handle `POST /api/chat`
///
/// # Errors
///
/// * `400 Bad Request` - the body is not UTF-8 JSON; nothing is published
/// * `503 Service Unavailable` - the broker is unreachable or the publish failed
///
/// # Example Request
///
/// ```http
/// POST /api/chat HTTP/1.1
/// Content-Type: application/json
///
/// {"id":"x1","userId":"u1","username":"Alice","content":"hi","date":"2024-01-01T10:30:00.000Z"}
/// ```
pub async fn handle_chat_publish(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), BackendError> {
    let payload = std::str::from_utf8(&body).map_err(|e| {
        tracing::warn!("[Server] Rejected publish with non-UTF-8 body: {}", e);
        BackendError::malformed(e.to_string())
    })?;

    serde_json::from_str::<IgnoredAny>(payload).map_err(|e| {
        tracing::warn!("[Server] Rejected publish with malformed JSON: {}", e);
        BackendError::malformed(e.to_string())
    })?;

    let topic = &app_state.config.topic;
    let receivers = app_state
        .broker
        .publish(topic, payload)
        .await
        .map_err(|e| {
            tracing::error!("[Server] Publish to '{}' failed: {}", topic, e);
            e
        })?;

    tracing::info!(
        "[Server] Published {} bytes to '{}' ({} receivers)",
        payload.len(),
        topic,
        receivers
    );

    Ok((StatusCode::OK, "OK"))
}

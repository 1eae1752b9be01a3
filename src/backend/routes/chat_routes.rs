//! Chat route configuration

use crate::backend::chat::handlers::{handle_chat_publish, handle_chat_subscription, handle_hello};
use crate::backend::server::state::AppState;
use axum::{routing::get, Router};

/// Add the chat endpoints to `router`
///
/// - `GET /api/chat` - SSE stream of relayed messages
/// - `POST /api/chat` - publish one message
/// - `GET /api/hello` - demo stream
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/chat",
            get(handle_chat_subscription).post(handle_chat_publish),
        )
        .route("/api/hello", get(handle_hello))
}

//! Demo stream handler
//!
//! `GET /api/hello` writes a greeting, counts ten "mississippi"s one tick
//! apart, then signs off and closes. Handy for checking that a proxy in
//! front of the server passes streamed bodies through unbuffered.

use crate::backend::chat::handlers::subscription::event_stream_response;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use axum::{body::Body, extract::State, response::Response};
use bytes::Bytes;
use futures_util::{stream, Stream};
use std::convert::Infallible;
use std::time::Duration;

const COUNT: u32 = 10;

/// Chunks of the hello stream, one tick apart after the first
pub fn hello_stream(interval: Duration) -> impl Stream<Item = Result<Bytes, Infallible>> + Send {
    stream::unfold(0u32, move |step| async move {
        let chunk = match step {
            0 => "Hello, world!".to_string(),
            n if n <= COUNT => {
                tokio::time::sleep(interval).await;
                format!("\n{} mississippi", n)
            }
            n if n == COUNT + 1 => {
                tokio::time::sleep(interval).await;
                "\nThat's all, folks!".to_string()
            }
            _ => return None,
        };
        Some((Ok(Bytes::from(chunk)), step + 1))
    })
}

/// Handle `GET /api/hello`
pub async fn handle_hello(State(app_state): State<AppState>) -> Result<Response<Body>, BackendError> {
    tracing::info!("[Server] Hello stream requested");
    event_stream_response(Body::from_stream(hello_stream(
        app_state.config.hello_interval,
    )))
}

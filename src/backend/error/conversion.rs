/**
 * Error Conversion
 *
 * Turns a `BackendError` into an HTTP response so handlers can return
 * `Result<_, BackendError>`.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Broker unavailable: connection refused",
 *   "status": 503
 * }
 * ```
 */

use crate::backend::error::types::BackendError;
use axum::{
    response::{IntoResponse, Response},
    Json,
};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Server] {} ({})", message, status);
        } else {
            tracing::warn!("[Server] {} ({})", message, status);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

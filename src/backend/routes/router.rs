/**
 * Router Configuration
 *
 * Combines every route into one Axum router.
 *
 * # Route Order
 *
 * 1. Chat routes (`/api/chat`, `/api/hello`)
 * 2. Health probe (`/health`)
 * 3. Fallback: static files from the configured directory, 404 otherwise
 */

use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let static_dir = app_state.config.static_dir.clone();

    let router = configure_chat_routes(Router::new());

    let router = router.route("/health", get(|| async { "OK" }));

    // Anything that is not an API route is looked up on disk
    let router = router.fallback_service(ServeDir::new(static_dir));

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

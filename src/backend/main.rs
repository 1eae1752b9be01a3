/**
 * Chatcast Server Entry Point
 *
 * Loads configuration from the environment, builds the Axum app and serves
 * it until Ctrl-C.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use chatcast::backend::server::{config::ServerConfig, init::create_app};
    use std::future::IntoFuture;

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("[Server] Starting chatcast server");

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr();
    let app = create_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("[Server] Listening on {}", listener.local_addr()?);

    // Open SSE streams never finish on their own, so shutdown drops them
    // instead of waiting for a graceful drain
    tokio::select! {
        result = axum::serve(listener, app).into_future() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("[Server] Shutdown signal received");
        }
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin chatcast-server --features ssr");
    std::process::exit(1);
}

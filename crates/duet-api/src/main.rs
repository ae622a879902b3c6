//! Duet API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use duet_api::config::ServerConfig;
use duet_api::state::AppState;
use duet_api::words::FileWordSource;
use duet_core::rng::StdGameRng;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Duet API server");

    let config = ServerConfig::from_env()?;
    let word_source = FileWordSource::load(&config.words_file)?;

    // Build application state.
    let app_state = AppState::new(
        Arc::new(Mutex::new(StdGameRng::from_os())),
        Arc::new(word_source),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = duet_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

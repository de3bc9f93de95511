mod config;
mod discovery;
mod errors;
mod llm_client;
mod models;
mod presentation;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, GenerativeProvider};
use crate::routes::build_router;
use crate::state::AppState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Navigator API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generative provider
    let provider: Arc<dyn GenerativeProvider> = Arc::new(GeminiClient::new(&config)?);
    info!(
        "Gemini client initialized ({}, {} attempt(s) per call)",
        config.gemini_base_url, config.llm_max_attempts
    );

    let state = AppState::new(provider, config.clone());
    info!("Default practice hub location: {}", config.default_location);

    // Idle sessions are dropped lazily on access and by a periodic sweep.
    let _sweeper = state
        .controller
        .spawn_sweeper(config.session_ttl.min(SWEEP_INTERVAL));
    info!("Session TTL: {}s", config.session_ttl.as_secs());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

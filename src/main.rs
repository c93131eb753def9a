//! Pest Chat - lead-capture chat widget backend
//!
//! A Rust backend implementing a keyword-driven chat session state machine
//! that answers pest questions and captures contact leads.

mod api;
mod config;
mod intent;
mod responses;
mod runtime;
mod state_machine;
mod submitter;

use api::{create_router, AppState};
use config::ChatConfig;
use runtime::RuntimeManager;
use std::net::SocketAddr;
use std::sync::Arc;
use submitter::HttpLeadSubmitter;
use tokio_util::sync::CancellationToken;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pest_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ChatConfig::from_env();
    tracing::info!(
        port = config.port,
        lead_endpoint = %config.lead_endpoint,
        reply_delay_ms = u64::try_from(config.reply_delay.as_millis()).unwrap_or(u64::MAX),
        session_ttl_secs = config.session_ttl.as_secs(),
        "Configuration loaded"
    );

    let shutdown = CancellationToken::new();
    let submitter = Arc::new(HttpLeadSubmitter::new(&config.lead_endpoint));
    let runtime = RuntimeManager::new(&config, submitter, shutdown.clone());
    let state = AppState::new(runtime);
    state.runtime.spawn_reaper();

    // The widget is embedded on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Pest chat server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl-C, then stop every session and open stream
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown requested");
    shutdown.cancel();
}

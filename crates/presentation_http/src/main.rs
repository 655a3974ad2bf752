//! walkwise HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, config::ServerConfig, init_telemetry};
use presentation_http::{AppState, routes};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging needs the config, so a load failure is reported once logging is up
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let _telemetry = init_telemetry(&config.telemetry)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {e}"))?;

    if let Err(e) = &loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!("walkwise v{} starting", env!("CARGO_PKG_VERSION"));

    config.validate()?;
    config.log_summary();

    let state = AppState::from_config(&config)?;

    let app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size_json_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API docs: http://{}/swagger-ui", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// CORS policy: any origin when no list is configured, nothing when disabled
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if !server.cors_enabled {
        return CorsLayer::new();
    }

    if server.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    info!("Waiting up to {:?} for connections to close", timeout);
}

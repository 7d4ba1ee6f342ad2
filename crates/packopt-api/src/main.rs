//! # packopt-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the pack optimizer.
//! Binds to `0.0.0.0:$PORT` (default 8080) and drains in-flight requests on
//! Ctrl-C.

use packopt_api::config::{AppConfig, LogFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration first: it selects the log format.
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let port = config.port;
    tracing::info!(
        pack_sizes = %config.pack_sizes,
        max_order_quantity = config.limits.max_order_quantity,
        solve_timeout_ms = config.solve_timeout.as_millis() as u64,
        metrics = config.metrics_enabled,
        "configuration loaded"
    );

    let state = packopt_api::AppState::try_new(config).map_err(|e| {
        tracing::error!("Metrics registry initialization failed: {e}");
        e
    })?;
    let app = packopt_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Pack optimizer API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl-C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

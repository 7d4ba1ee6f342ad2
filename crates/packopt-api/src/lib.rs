//! # packopt-api: Axum API Service
//!
//! HTTP surface for the pack optimizer, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `POST /optimize`: minimal-waste packing for an order quantity
//! - `GET`/`POST /packages`: read or replace the versioned pack-size catalog
//! - `/health`, `/health/liveness`, `/health/readiness`: status and probes
//! - `/metrics`: Prometheus exposition (when `METRICS_ENABLED` is not `false`)
//! - `/openapi.json`: generated OpenAPI 3.1 document
//!
//! ## Middleware Stack (Tower)
//!
//! CORS → TraceLayer → MetricsMiddleware → body limit → Handler
//!
//! ## Crate Policy
//!
//! - No optimization logic in route handlers: delegates to `packopt-core`.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::Router;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(routes::optimize::router())
        .merge(routes::packages::router())
        .merge(routes::health::router())
        .merge(openapi::router());

    if state.config.metrics_enabled {
        api = api.route("/metrics", axum::routing::get(prometheus_metrics));
    }

    let mut api = api.layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    // Only register the metrics middleware when metrics are enabled.
    if state.config.metrics_enabled {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(state.metrics.clone()));
    }

    api.layer(middleware::tracing_layer::layer())
        .layer(middleware::cors::layer())
        .with_state(state)
}

/// GET /metrics: Prometheus metrics scrape endpoint.
///
/// Refreshes the catalog gauges from the active catalog on each scrape, then
/// encodes every metric in the Prometheus text exposition format.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog.snapshot();
    state
        .metrics
        .set_catalog(catalog.version, catalog.pack_sizes.len());

    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

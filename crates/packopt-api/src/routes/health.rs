//! # Health API
//!
//! `GET /health` is the status document browser clients poll. The
//! `/health/liveness` and `/health/readiness` probes are plain text for
//! orchestrators.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: String,
    /// Human-readable status line.
    pub message: String,
}

/// Build the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

/// GET /health: Report that the service is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse),
    ),
    tag = "health"
)]
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Pack Optimizer API is running".to_string(),
    })
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 503 while the catalog lock cannot be taken.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.try_snapshot() {
        Some(_) => (StatusCode::OK, "ready"),
        None => {
            tracing::warn!("readiness probe could not read the catalog");
            (StatusCode::SERVICE_UNAVAILABLE, "catalog locked")
        }
    }
}

//! # Packages API
//!
//! Reads and replaces the active pack-size catalog.
//!
//! A replacement is validated in full before it is installed: every size
//! positive, no duplicates, at least one size, none above `MAX_PACK_SIZE`.
//! A rejected body leaves the active catalog and its version untouched.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use packopt_core::PackSizeSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Request body for `POST /packages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackSizesRequest {
    /// The new catalog, in display order.
    pub pack_sizes: Vec<i64>,
}

/// Response body for `GET /packages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackSizesResponse {
    /// The active pack sizes, in the order they were configured.
    pub pack_sizes: Vec<u64>,
    /// Human-readable status line.
    pub message: String,
    /// Catalog version.
    pub version: u64,
    /// When this version was installed.
    pub updated_at: DateTime<Utc>,
}

/// Response body for `POST /packages`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackSizesResponse {
    /// Human-readable status line.
    pub message: String,
    /// Version of the newly installed catalog.
    pub version: u64,
    /// The installed pack sizes.
    pub pack_sizes: Vec<u64>,
}

/// Build the packages router.
pub fn router() -> Router<AppState> {
    Router::new().route("/packages", get(get_pack_sizes).post(update_pack_sizes))
}

/// GET /packages: Return the active pack-size catalog.
#[utoipa::path(
    get,
    path = "/packages",
    responses(
        (status = 200, description = "Active catalog", body = PackSizesResponse),
    ),
    tag = "packages"
)]
pub(crate) async fn get_pack_sizes(State(state): State<AppState>) -> Json<PackSizesResponse> {
    let catalog = state.catalog.snapshot();
    Json(PackSizesResponse {
        pack_sizes: catalog.pack_sizes.as_slice().to_vec(),
        message: "Current pack sizes configuration".to_string(),
        version: catalog.version,
        updated_at: catalog.updated_at,
    })
}

/// POST /packages: Replace the active pack-size catalog.
#[utoipa::path(
    post,
    path = "/packages",
    request_body = UpdatePackSizesRequest,
    responses(
        (status = 200, description = "Catalog replaced", body = UpdatePackSizesResponse),
        (status = 400, description = "Malformed body or invalid pack sizes", body = crate::error::ErrorBody),
    ),
    tag = "packages"
)]
pub(crate) async fn update_pack_sizes(
    State(state): State<AppState>,
    body: Result<Json<UpdatePackSizesRequest>, JsonRejection>,
) -> Result<Json<UpdatePackSizesResponse>, AppError> {
    let req = extract_json(body)?;
    let pack_sizes = PackSizeSet::new(req.pack_sizes)?;
    state
        .config
        .limits
        .check_pack_sizes(&pack_sizes)
        .map_err(AppError::Validation)?;

    let catalog = state.catalog.replace(pack_sizes);
    tracing::info!(
        version = catalog.version,
        pack_sizes = %catalog.pack_sizes,
        "pack sizes updated"
    );

    Ok(Json(UpdatePackSizesResponse {
        message: "Pack sizes updated successfully".to_string(),
        version: catalog.version,
        pack_sizes: catalog.pack_sizes.as_slice().to_vec(),
    }))
}

//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI 3.1 document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pack Optimizer API",
        description = "Computes the combination of fixed-size packs that fulfils an order with the least waste, then the fewest packs.",
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        crate::routes::optimize::optimize,
        crate::routes::packages::get_pack_sizes,
        crate::routes::packages::update_pack_sizes,
        crate::routes::health::health,
    ),
    components(schemas(
        crate::routes::optimize::OptimizeRequest,
        crate::routes::optimize::OptimizeResponse,
        crate::routes::optimize::PackQuantity,
        crate::routes::packages::UpdatePackSizesRequest,
        crate::routes::packages::PackSizesResponse,
        crate::routes::packages::UpdatePackSizesResponse,
        crate::routes::health::HealthResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "optimize", description = "Order packing"),
        (name = "packages", description = "Pack-size catalog"),
        (name = "health", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

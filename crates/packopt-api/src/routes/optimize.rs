//! # Optimize API
//!
//! `POST /optimize` computes the minimal-waste packing for an order against
//! the active catalog.
//!
//! The handler takes a catalog snapshot, bounds the quantity by
//! `MAX_ORDER_QUANTITY`, and runs the solver on the blocking pool under the
//! configured deadline. A request that outlives the deadline gets a 503; the
//! solver task itself runs to completion in the background.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use packopt_core::{OrderQuantity, PackCount, PackingResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::middleware::metrics::Outcome;
use crate::state::AppState;

/// Request body for `POST /optimize`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptimizeRequest {
    /// Number of items ordered. Must be positive.
    pub quantity: i64,
}

impl Validate for OptimizeRequest {
    fn validate(&self) -> Result<(), String> {
        if self.quantity <= 0 {
            return Err("Quantity must be positive".to_string());
        }
        Ok(())
    }
}

/// Packs of one size in an optimization response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackQuantity {
    /// The pack size.
    pub pack_size: u64,
    /// Number of packs of this size.
    pub quantity: u64,
}

/// Response body for `POST /optimize`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    /// The quantity that was ordered.
    pub order_quantity: u64,
    /// Items shipped.
    pub total_items: u64,
    /// Packs shipped.
    pub total_packs: u64,
    /// Packs per size, largest first.
    pub packs: Vec<PackQuantity>,
    /// Items shipped beyond the order.
    pub waste: u64,
}

impl From<PackingResult> for OptimizeResponse {
    fn from(result: PackingResult) -> Self {
        Self {
            order_quantity: result.order_quantity,
            total_items: result.total_items,
            total_packs: result.total_packs,
            packs: result
                .packs
                .into_iter()
                .map(|PackCount { pack_size, count }| PackQuantity {
                    pack_size,
                    quantity: count,
                })
                .collect(),
            waste: result.waste,
        }
    }
}

/// Build the optimize router.
pub fn router() -> Router<AppState> {
    Router::new().route("/optimize", post(optimize))
}

/// POST /optimize: Compute the optimal pack combination for a quantity.
#[utoipa::path(
    post,
    path = "/optimize",
    request_body = OptimizeRequest,
    responses(
        (status = 200, description = "Optimal packing", body = OptimizeResponse),
        (status = 400, description = "Malformed body or invalid quantity", body = crate::error::ErrorBody),
        (status = 503, description = "Optimization exceeded its deadline", body = crate::error::ErrorBody),
    ),
    tag = "optimize"
)]
pub(crate) async fn optimize(
    State(state): State<AppState>,
    body: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let result = run(&state, body).await;
    let outcome = match &result {
        Ok(_) => Outcome::Solved,
        Err(
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::PayloadTooLarge(_),
        ) => Outcome::Rejected,
        Err(AppError::ServiceUnavailable(_)) => Outcome::TimedOut,
        Err(AppError::Internal(_)) => Outcome::Failed,
    };
    state.metrics.record_optimization(outcome);
    result.map(|r| Json(r.into()))
}

async fn run(
    state: &AppState,
    body: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<PackingResult, AppError> {
    let req = extract_validated_json(body)?;
    let quantity = OrderQuantity::new(req.quantity)?;

    let max = state.config.limits.max_order_quantity;
    if quantity.get() > max {
        return Err(AppError::Validation(format!(
            "Quantity {quantity} exceeds the maximum of {max}"
        )));
    }

    let catalog = state.catalog.snapshot();
    tracing::debug!(
        quantity = quantity.get(),
        catalog_version = catalog.version,
        "optimizing order"
    );

    let deadline = state.config.solve_timeout;
    let task = tokio::task::spawn_blocking(move || {
        packopt_core::solve_validated(quantity, &catalog.pack_sizes)
    });

    let result = match tokio::time::timeout(deadline, task).await {
        Err(_) => {
            return Err(AppError::ServiceUnavailable(format!(
                "optimization of {quantity} items exceeded the {} ms deadline",
                deadline.as_millis()
            )))
        }
        Ok(Err(join_err)) => {
            return Err(AppError::Internal(format!(
                "optimization task failed: {join_err}"
            )))
        }
        Ok(Ok(result)) => result?,
    };

    tracing::info!(
        quantity = result.order_quantity,
        total_items = result.total_items,
        total_packs = result.total_packs,
        waste = result.waste,
        "order optimized"
    );
    Ok(result)
}

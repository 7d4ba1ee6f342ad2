//! # API Error Types
//!
//! [`AppError`] renders as `{"error": {"code", "message"}}` with the status
//! for its kind. Client-facing messages are passed through; internal ones are
//! logged and replaced with a fixed string.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use packopt_core::PackError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// The error.
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Every failure a handler can return.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Quantity or pack sizes rejected (400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body exceeds the size limit (413).
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Solver or task failure (500). Logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// The optimization did not finish in time (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "optimization timed out"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }

        let message = match self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::BadRequest(m)
            | Self::Validation(m)
            | Self::PayloadTooLarge(m)
            | Self::ServiceUnavailable(m) => m,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Input errors are the caller's to fix; infeasibility is ours.
impl From<PackError> for AppError {
    fn from(err: PackError) -> Self {
        if err.is_input_error() {
            Self::Validation(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use packopt_core::PackSizeViolation;

    async fn render(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn every_variant_has_status_and_code() {
        let cases = [
            (AppError::BadRequest("EOF while parsing".into()), 400, "BAD_REQUEST"),
            (AppError::Validation("Quantity must be positive".into()), 400, "VALIDATION_ERROR"),
            (AppError::PayloadTooLarge("length limit exceeded".into()), 413, "PAYLOAD_TOO_LARGE"),
            (AppError::Internal("join failed".into()), 500, "INTERNAL_ERROR"),
            (AppError::ServiceUnavailable("deadline".into()), 503, "SERVICE_UNAVAILABLE"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (StatusCode::from_u16(status).unwrap(), code));
        }
    }

    #[test]
    fn pack_errors_map_by_kind() {
        let quantity = PackError::InvalidQuantity {
            quantity: 0,
            reason: "order quantity must be positive".into(),
        };
        assert!(matches!(AppError::from(quantity), AppError::Validation(msg) if msg.contains("positive")));

        let sizes = PackError::InvalidPackSizes(PackSizeViolation::Duplicate(250));
        assert!(matches!(AppError::from(sizes), AppError::Validation(msg) if msg.contains("250")));

        let infeasible = PackError::Infeasible {
            order_quantity: 10,
            ceiling: 20,
        };
        assert!(matches!(AppError::from(infeasible), AppError::Internal(_)));
    }

    #[tokio::test]
    async fn validation_message_reaches_client() {
        let (status, body) = render(AppError::Validation("Quantity must be positive".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert!(body.error.message.contains("Quantity must be positive"));
    }

    #[tokio::test]
    async fn infeasible_details_are_hidden() {
        let err = AppError::from(PackError::Infeasible {
            order_quantity: 10,
            ceiling: 20,
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert_eq!(body.error.message, "An internal error occurred");
    }

    #[tokio::test]
    async fn deadline_message_reaches_client() {
        let (status, body) =
            render(AppError::ServiceUnavailable("exceeded the 5 ms deadline".into())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.error.message.contains("deadline"));
    }

    #[test]
    fn body_shape_is_nested_under_error() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: "pack sizes must be unique".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "error": {"code": "VALIDATION_ERROR", "message": "pack sizes must be unique"}
            })
        );
    }
}

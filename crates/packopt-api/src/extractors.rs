//! # JSON Body Extraction
//!
//! Handlers take their body as `Result<Json<T>, JsonRejection>` and pass it
//! through [`extract_json`] or [`extract_validated_json`], so a bad body gets
//! the structured error document instead of axum's plain-text rejection.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;

/// Rules a request DTO enforces after it deserializes.
pub trait Validate {
    /// The client-facing reason the request is unacceptable.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON body. Oversized bodies become [`AppError::PayloadTooLarge`],
/// every other rejection [`AppError::BadRequest`].
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::PayloadTooLarge(rejection.body_text()))
        }
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// [`extract_json`], then [`Validate::validate`] mapped to [`AppError::Validation`].
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(body)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequest;
    use axum::http::Request;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Order {
        quantity: i64,
    }

    impl Validate for Order {
        fn validate(&self) -> Result<(), String> {
            if self.quantity > 0 {
                Ok(())
            } else {
                Err("Quantity must be positive".to_string())
            }
        }
    }

    async fn parse(body: &'static str) -> Result<Json<Order>, JsonRejection> {
        let req = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body))
            .unwrap();
        Json::<Order>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let order = extract_validated_json(parse(r#"{"quantity": 3}"#).await).unwrap();
        assert_eq!(order.quantity, 3);
    }

    #[tokio::test]
    async fn syntax_error_is_bad_request() {
        let err = extract_json(parse(r#"{"quantity": "#).await).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn rule_violation_is_validation() {
        let err = extract_validated_json(parse(r#"{"quantity": 0}"#).await).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Quantity must be positive"));
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .body(axum::body::Body::from(r#"{"quantity": 3}"#))
            .unwrap();
        let err = extract_json(Json::<Order>::from_request(req, &()).await).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}

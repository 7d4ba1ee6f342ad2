//! # Integration Tests for packopt-api
//!
//! Drives the fully assembled router: optimization against a live catalog,
//! catalog replacement, health probes, CORS, body limits, metrics exposition,
//! and the OpenAPI document.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use packopt_api::config::AppConfig;
use packopt_api::state::AppState;
use packopt_core::PackSizeSet;

fn test_state() -> AppState {
    let sizes = PackSizeSet::new([250, 500, 1000, 2000, 5000]).unwrap();
    AppState::try_new(AppConfig::with_pack_sizes(sizes)).unwrap()
}

fn test_app() -> axum::Router {
    packopt_api::app(test_state())
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

// -- Optimize -----------------------------------------------------------------

#[tokio::test]
async fn test_optimize_default_catalog() {
    let cases = [
        (1, 250, 1, 249),
        (250, 250, 1, 0),
        (251, 500, 1, 249),
        (501, 750, 2, 249),
        (12001, 12250, 4, 249),
    ];
    for (quantity, total_items, total_packs, waste) in cases {
        let response = test_app()
            .oneshot(post_json("/optimize", format!(r#"{{"quantity": {quantity}}}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "quantity {quantity}");
        let body = body_json(response).await;
        assert_eq!(body["orderQuantity"], quantity, "quantity {quantity}");
        assert_eq!(body["totalItems"], total_items, "quantity {quantity}");
        assert_eq!(body["totalPacks"], total_packs, "quantity {quantity}");
        assert_eq!(body["waste"], waste, "quantity {quantity}");
    }
}

#[tokio::test]
async fn test_optimize_after_catalog_update() {
    let state = test_state();

    let response = packopt_api::app(state.clone())
        .oneshot(post_json("/packages", r#"{"packSizes": [23, 31, 53]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = packopt_api::app(state)
        .oneshot(post_json("/optimize", r#"{"quantity": 500000}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["packs"],
        serde_json::json!([
            {"packSize": 53, "quantity": 9429},
            {"packSize": 31, "quantity": 7},
            {"packSize": 23, "quantity": 2}
        ])
    );
    assert_eq!(body["waste"], 0);
}

#[tokio::test]
async fn test_optimize_rejects_non_positive_quantity() {
    for quantity in [0, -1] {
        let response = test_app()
            .oneshot(post_json("/optimize", format!(r#"{{"quantity": {quantity}}}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_optimize_missing_field_is_bad_request() {
    let response = test_app()
        .oneshot(post_json("/optimize", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let padding = " ".repeat(packopt_api::MAX_BODY_BYTES + 1);
    let response = test_app()
        .oneshot(post_json("/optimize", format!(r#"{{"quantity": 1{padding}}}"#)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

// -- Packages -----------------------------------------------------------------

#[tokio::test]
async fn test_packages_round_trip_through_versions() {
    let state = test_state();

    let body = body_json(
        packopt_api::app(state.clone())
            .oneshot(get("/packages"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["version"], 1);

    for (n, sizes) in ["[100, 200]", "[7]"].iter().enumerate() {
        let response = packopt_api::app(state.clone())
            .oneshot(post_json("/packages", format!(r#"{{"packSizes": {sizes}}}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["version"], n as u64 + 2);
    }

    let body = body_json(packopt_api::app(state).oneshot(get("/packages")).await.unwrap()).await;
    assert_eq!(body["packSizes"], serde_json::json!([7]));
    assert_eq!(body["version"], 3);
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/packages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_health_document() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"status": "healthy", "message": "Pack Optimizer API is running"})
    );
}

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- CORS ---------------------------------------------------------------------

#[tokio::test]
async fn test_cors_preflight_on_optimize() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/optimize")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

// -- Metrics ------------------------------------------------------------------

#[tokio::test]
async fn test_metrics_endpoint_reports_requests_and_catalog() {
    let state = test_state();
    packopt_api::app(state.clone())
        .oneshot(post_json("/optimize", r#"{"quantity": 501}"#))
        .await
        .unwrap();
    packopt_api::app(state.clone())
        .oneshot(post_json("/optimize", r#"{"quantity": 0}"#))
        .await
        .unwrap();

    let response = packopt_api::app(state.clone())
        .oneshot(get("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_string(response).await;
    assert!(text.contains("packopt_http_requests_total"));
    assert!(text.contains("path=\"/optimize\""));
    assert!(text.contains("packopt_optimizations_total{outcome=\"solved\"} 1"));
    assert!(text.contains("packopt_optimizations_total{outcome=\"rejected\"} 1"));
    assert!(text.contains("packopt_catalog_version 1"));
    assert!(text.contains("packopt_catalog_pack_sizes 5"));
    assert_eq!(state.metrics.errors(), 1);
}

#[tokio::test]
async fn test_metrics_disabled_hides_endpoint() {
    let sizes = PackSizeSet::new([250]).unwrap();
    let mut config = AppConfig::with_pack_sizes(sizes);
    config.metrics_enabled = false;
    let state = AppState::try_new(config).unwrap();

    let response = packopt_api::app(state.clone())
        .oneshot(get("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.metrics.requests(), 0);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_document_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/optimize"]["post"].is_object());
    assert!(body["paths"]["/packages"]["get"].is_object());
}

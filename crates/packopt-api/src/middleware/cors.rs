//! # CORS
//!
//! The browser UI is served from a different origin than the API, so every
//! route answers cross-origin requests: any origin, `GET`/`POST`/`OPTIONS`,
//! and the `Content-Type` request header. Preflight requests are answered by
//! the layer with `200 OK` before reaching a handler.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer applied to the whole router.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

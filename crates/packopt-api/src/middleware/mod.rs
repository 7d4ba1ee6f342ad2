//! # Middleware Stack
//!
//! Tower middleware for the API layer:
//! - [`tracing_layer`]: request/response tracing with `TraceLayer`.
//! - [`metrics`]: Prometheus request and optimization metrics.
//! - [`cors`]: permissive CORS for browser clients.

pub mod cors;
pub mod metrics;
pub mod tracing_layer;

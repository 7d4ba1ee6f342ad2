//! # Prometheus Metrics
//!
//! One [`Registry`] per [`ApiMetrics`], so tests and multiple app instances
//! never share counters.
//!
//! | Metric | Kind | Labels | Recorded by |
//! |---|---|---|---|
//! | `packopt_http_requests_total` | counter | method, path, status | [`metrics_middleware`] |
//! | `packopt_http_request_duration_seconds` | histogram | method, path | [`metrics_middleware`] |
//! | `packopt_http_errors_total` | counter | method, path, status | [`metrics_middleware`] |
//! | `packopt_optimizations_total` | counter | outcome | `POST /optimize` |
//! | `packopt_catalog_version` | gauge | | `/metrics` scrape |
//! | `packopt_catalog_pack_sizes` | gauge | | `/metrics` scrape |

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::core::Collector;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

const LATENCY_BUCKETS: [f64; 11] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// How an optimization request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A packing was returned.
    Solved,
    /// The input was rejected.
    Rejected,
    /// The deadline elapsed first.
    TimedOut,
    /// The solver or its task failed.
    Failed,
}

impl Outcome {
    fn label(self) -> &'static str {
        match self {
            Self::Solved => "solved",
            Self::Rejected => "rejected",
            Self::TimedOut => "timed_out",
            Self::Failed => "failed",
        }
    }
}

/// Cloneable handle to the API's collectors.
#[derive(Clone)]
pub struct ApiMetrics {
    collectors: Arc<Collectors>,
}

struct Collectors {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    errors: IntCounterVec,
    optimizations: IntCounterVec,
    catalog_version: IntGauge,
    catalog_pack_sizes: IntGauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish_non_exhaustive()
    }
}

fn counter(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<IntCounterVec, prometheus::Error> {
    let c = IntCounterVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(c.clone()))?;
    Ok(c)
}

fn gauge(registry: &Registry, name: &str, help: &str) -> Result<IntGauge, prometheus::Error> {
    let g = IntGauge::new(name, help)?;
    registry.register(Box::new(g.clone()))?;
    Ok(g)
}

impl ApiMetrics {
    /// Register every collector in a fresh registry.
    pub fn try_new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let http_labels = ["method", "path", "status"];

        let requests = counter(
            &registry,
            "packopt_http_requests_total",
            "HTTP requests served",
            &http_labels,
        )?;
        let errors = counter(
            &registry,
            "packopt_http_errors_total",
            "HTTP responses with a 4xx or 5xx status",
            &http_labels,
        )?;
        let optimizations = counter(
            &registry,
            "packopt_optimizations_total",
            "Optimization requests by outcome",
            &["outcome"],
        )?;

        let latency = HistogramVec::new(
            HistogramOpts::new(
                "packopt_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "path"],
        )?;
        registry.register(Box::new(latency.clone()))?;

        let catalog_version = gauge(
            &registry,
            "packopt_catalog_version",
            "Version of the active pack-size catalog",
        )?;
        let catalog_pack_sizes = gauge(
            &registry,
            "packopt_catalog_pack_sizes",
            "Number of pack sizes in the active catalog",
        )?;

        Ok(Self {
            collectors: Arc::new(Collectors {
                registry,
                requests,
                latency,
                errors,
                optimizations,
                catalog_version,
                catalog_pack_sizes,
            }),
        })
    }

    /// Requests recorded so far, across all labels.
    pub fn requests(&self) -> u64 {
        total(&self.collectors.requests)
    }

    /// Error responses recorded so far, across all labels.
    pub fn errors(&self) -> u64 {
        total(&self.collectors.errors)
    }

    /// Optimizations that ended with `outcome`.
    pub fn optimizations(&self, outcome: Outcome) -> u64 {
        self.collectors
            .optimizations
            .with_label_values(&[outcome.label()])
            .get()
    }

    fn observe_response(&self, method: &str, path: &str, status: u16, elapsed: f64) {
        let code = status.to_string();
        let labels = [method, path, code.as_str()];
        let c = &self.collectors;
        c.requests.with_label_values(&labels).inc();
        c.latency.with_label_values(&[method, path]).observe(elapsed);
        if status >= 400 {
            c.errors.with_label_values(&labels).inc();
        }
    }

    /// Count one finished optimization.
    pub fn record_optimization(&self, outcome: Outcome) {
        self.collectors
            .optimizations
            .with_label_values(&[outcome.label()])
            .inc();
    }

    /// Publish the active catalog's version and size.
    pub fn set_catalog(&self, version: u64, pack_sizes: usize) {
        let c = &self.collectors;
        c.catalog_version
            .set(i64::try_from(version).unwrap_or(i64::MAX));
        c.catalog_pack_sizes
            .set(i64::try_from(pack_sizes).unwrap_or(i64::MAX));
    }

    /// Render every collector in the text exposition format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let mut out = Vec::new();
        TextEncoder::new()
            .encode(&self.collectors.registry.gather(), &mut out)
            .map_err(|e| format!("encoding metrics failed: {e}"))?;
        String::from_utf8(out).map_err(|e| format!("metrics are not UTF-8: {e}"))
    }
}

fn total(vec: &IntCounterVec) -> u64 {
    vec.collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// Record method, route template, status and latency for every response.
///
/// The `path` label is the matched route (`/packages`), not the raw URI;
/// requests no route matched are labelled `unmatched`.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let Some(metrics) = request.extensions().get::<ApiMetrics>().cloned() else {
        return next.run(request).await;
    };
    let method = request.method().as_str().to_owned();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_owned();

    let started = Instant::now();
    let response = next.run(request).await;
    metrics.observe_response(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

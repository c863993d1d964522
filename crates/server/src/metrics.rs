//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Cinelog server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Viewer resolution failures
//! - Core detail page metrics (registered from `cinelog_core::metrics`)

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use regex_lite::Regex;
use tracing::error;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    if let Err(e) = register_metrics(&registry) {
        error!("Failed to register metrics: {}", e);
    }
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinelog_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .expect("valid http duration metric")
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinelog_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("valid http request metric")
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cinelog_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .expect("valid in-flight metric")
});

/// Requests whose credentials could not be resolved to a viewer.
pub static AUTH_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "cinelog_auth_failures_total",
            "Total viewer resolution failures",
        ),
        &["reason"],
    )
    .expect("valid auth failure metric")
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) -> prometheus::Result<()> {
    // HTTP
    registry.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    registry.register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))?;
    registry.register(Box::new(AUTH_FAILURES_TOTAL.clone()))?;

    // Core metrics (page loads, reconciliation, library mutations)
    cinelog_core::metrics::register_metrics(registry)
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

static NUMERIC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+(/|$)").expect("valid numeric segment regex"));

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    NUMERIC_SEGMENT.replace_all(path, "/{id}$1").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_numeric() {
        assert_eq!(normalize_path("/api/v1/movies/550"), "/api/v1/movies/{id}");
    }

    #[test]
    fn test_normalize_path_numeric_middle() {
        assert_eq!(
            normalize_path("/api/v1/movies/550/watched/rating"),
            "/api/v1/movies/{id}/watched/rating"
        );
    }

    #[test]
    fn test_normalize_path_no_ids() {
        assert_eq!(normalize_path("/api/v1/health"), "/api/v1/health");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();
        cinelog_core::metrics::PAGE_LOADS
            .with_label_values(&["loaded"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("cinelog_http_requests_total"));
        assert!(output.contains("cinelog_page_loads_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }
}

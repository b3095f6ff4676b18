//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Premiações metrics
pub const METRICS_PREFIX: &str = "premiacoes";

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Dashboard metrics
    describe_counter!(
        format!("{}_dashboard_reports_total", METRICS_PREFIX),
        Unit::Count,
        "Total dashboard reports computed"
    );

    describe_histogram!(
        format!("{}_dashboard_compute_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Dashboard aggregation latency in seconds"
    );

    // Upload metrics
    describe_counter!(
        format!("{}_uploads_total", METRICS_PREFIX),
        Unit::Count,
        "Total storage uploads"
    );

    describe_counter!(
        format!("{}_upload_bytes_total", METRICS_PREFIX),
        Unit::Bytes,
        "Total bytes uploaded to storage"
    );

    // Mutation metrics
    describe_counter!(
        format!("{}_mutations_total", METRICS_PREFIX),
        Unit::Count,
        "Total create/update/delete operations"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a dashboard computation
pub fn record_dashboard(duration_secs: f64, honoree_count: usize) {
    counter!(format!("{}_dashboard_reports_total", METRICS_PREFIX)).increment(1);

    histogram!(
        format!("{}_dashboard_compute_duration_seconds", METRICS_PREFIX),
        "honorees" => bucket_label(honoree_count)
    )
    .record(duration_secs);
}

/// Helper to record a storage upload
pub fn record_upload(bucket: &str, bytes: usize) {
    counter!(
        format!("{}_uploads_total", METRICS_PREFIX),
        "bucket" => bucket.to_string()
    )
    .increment(1);

    counter!(
        format!("{}_upload_bytes_total", METRICS_PREFIX),
        "bucket" => bucket.to_string()
    )
    .increment(bytes as u64);
}

/// Helper to record an entity mutation
pub fn record_mutation(entity: &str, operation: &str) {
    counter!(
        format!("{}_mutations_total", METRICS_PREFIX),
        "entity" => entity.to_string(),
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Coarse cardinality bucket for the honoree-count label
fn bucket_label(count: usize) -> &'static str {
    match count {
        0..=99 => "lt_100",
        100..=999 => "lt_1000",
        _ => "ge_1000",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_label() {
        assert_eq!(bucket_label(0), "lt_100");
        assert_eq!(bucket_label(500), "lt_1000");
        assert_eq!(bucket_label(5000), "ge_1000");
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/api/dashboard");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }
}

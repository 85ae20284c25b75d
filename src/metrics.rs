//! Request counters and latency metrics for the façade.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Processing request counter metric name.
pub const METRIC_PROCESS_REQUESTS: &str = "process_requests_total";
/// Processing failure counter metric name.
pub const METRIC_PROCESS_FAILURES: &str = "process_failures_total";
/// Images served counter metric name.
pub const METRIC_IMAGES_SERVED: &str = "images_served_total";
/// Collaborator call latency metric name.
pub const METRIC_PROCESSING_LATENCY: &str = "processing_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_PROCESS_REQUESTS,
        "Total number of processing requests accepted"
    );
    describe_counter!(
        METRIC_PROCESS_FAILURES,
        "Total number of processing requests that failed"
    );
    describe_counter!(METRIC_IMAGES_SERVED, "Total number of images served");
    describe_histogram!(
        METRIC_PROCESSING_LATENCY,
        "Collaborator call latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the processing-request counter.
pub fn inc_process_requests() {
    counter!(METRIC_PROCESS_REQUESTS).increment(1);
}

/// Increment the processing-failure counter.
pub fn inc_process_failures() {
    counter!(METRIC_PROCESS_FAILURES).increment(1);
}

/// Increment the images-served counter.
pub fn inc_images_served() {
    counter!(METRIC_IMAGES_SERVED).increment(1);
}

/// Record collaborator call latency.
pub fn record_processing_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_PROCESSING_LATENCY).record(latency_ms);
}

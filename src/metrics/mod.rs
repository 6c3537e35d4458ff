//! Prometheus metrics for the trends bridge
//!
//! This module provides metrics tracking for:
//! - HTTP requests to the trends endpoint, by outcome
//! - Analysis runs, by source and outcome
//! - Analysis duration, by source
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all bridge metrics
struct BridgeMetrics {
    requests: CounterVec,
    analysis_runs: CounterVec,
    analysis_duration: HistogramVec,
}

/// Global storage for bridge metrics
static BRIDGE_METRICS: OnceLock<BridgeMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// This function should be called once at application startup.
/// Calling it again is a no-op.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = asgard_trends::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    // Prevent double initialization
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = BridgeMetrics {
        requests: register_counter_vec!(
            "asgard_trends_requests_total",
            "Total requests to the predictive trends endpoint by outcome",
            &["outcome"]
        )?,
        analysis_runs: register_counter_vec!(
            "asgard_trends_analysis_runs_total",
            "Total analysis runs by source and outcome",
            &["source", "outcome"]
        )?,
        analysis_duration: register_histogram_vec!(
            "asgard_trends_analysis_duration_seconds",
            "Time spent producing a trend report in seconds",
            &["source"],
            vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]
        )?,
    };

    BRIDGE_METRICS
        .set(metrics)
        .map_err(|_| "Bridge metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a request to the trends endpoint
pub fn record_request(outcome: &str) {
    if let Some(m) = BRIDGE_METRICS.get() {
        m.requests.with_label_values(&[outcome]).inc();
    }
}

/// Record a finished analysis run
pub fn record_analysis(source: &str, outcome: &str, duration_secs: f64) {
    let Some(m) = BRIDGE_METRICS.get() else {
        return;
    };

    m.analysis_runs.with_label_values(&[source, outcome]).inc();
    m.analysis_duration
        .with_label_values(&[source])
        .observe(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_is_safe_before_and_after_init() {
        record_request("success");
        record_analysis("live", "failed", 0.5);

        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());

        record_request("success");
        record_analysis("simulated", "success", 0.001);

        let text = encode_metrics().unwrap();
        assert!(text.contains("asgard_trends_requests_total"));
        assert!(text.contains("asgard_trends_analysis_runs_total"));
    }
}

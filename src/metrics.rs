//! Prometheus metrics for incident submission and store access.
//!
//! All collectors live in a process-wide registry and are exposed in text
//! exposition format at `/metrics`.
//!
//! # Example
//! ```no_run
//! use spill_incident_manager::metrics::{StoreOperation, record_store_operation};
//!
//! record_store_operation(StoreOperation::Load, "json_file", 0.002);
//! ```

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use strum::{AsRefStr, Display};

const NAMESPACE: &str = "spill_incident_manager";

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Incidents accepted and persisted
    pub static ref INCIDENTS_SUBMITTED_TOTAL: Counter = Counter::with_opts(
        Opts::new("incidents_submitted_total", "Total number of incidents persisted")
            .namespace(NAMESPACE)
    ).expect("Failed to create INCIDENTS_SUBMITTED_TOTAL metric");

    /// Rejected or failed submissions
    ///
    /// Labels: reason (error code)
    pub static ref INCIDENT_SUBMISSION_FAILURES_TOTAL: CounterVec = CounterVec::new(
        Opts::new(
            "incident_submission_failures_total",
            "Total number of incident submissions that were not persisted"
        )
        .namespace(NAMESPACE),
        &["reason"]
    ).expect("Failed to create INCIDENT_SUBMISSION_FAILURES_TOTAL metric");

    /// Store operations performed
    ///
    /// Labels: operation, backend
    pub static ref STORE_OPERATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("store_operations_total", "Total number of store operations")
            .namespace(NAMESPACE),
        &["operation", "backend"]
    ).expect("Failed to create STORE_OPERATIONS_TOTAL metric");

    /// Store operation latency in seconds
    ///
    /// Labels: operation, backend
    pub static ref STORE_OPERATION_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "store_operation_duration_seconds",
            "Store operation duration in seconds"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["operation", "backend"]
    ).expect("Failed to create STORE_OPERATION_DURATION_SECONDS metric");
}

/// Store operations tracked by the metrics above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum StoreOperation {
    Load,
    Append,
    GetById,
}

/// Register every collector with the global registry.
///
/// Must be called once at startup; a second call returns an
/// `AlreadyReg` error.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(INCIDENTS_SUBMITTED_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(INCIDENT_SUBMISSION_FAILURES_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(STORE_OPERATIONS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(STORE_OPERATION_DURATION_SECONDS.clone()))?;
    Ok(())
}

/// Record a completed store operation
pub fn record_store_operation(operation: StoreOperation, backend: &str, duration_secs: f64) {
    STORE_OPERATIONS_TOTAL
        .with_label_values(&[operation.as_ref(), backend])
        .inc();

    STORE_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation.as_ref(), backend])
        .observe(duration_secs);
}

/// Record a submission outcome
pub fn record_submission(outcome: Result<(), &str>) {
    match outcome {
        Ok(()) => INCIDENTS_SUBMITTED_TOTAL.inc(),
        Err(reason) => INCIDENT_SUBMISSION_FAILURES_TOTAL
            .with_label_values(&[reason])
            .inc(),
    }
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}

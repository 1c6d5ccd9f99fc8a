use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder
///
/// Fails if a recorder is already installed for this process.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "fare_estimates_total",
        "Estimate requests by outcome (priced, manual, configuration_error)"
    );
    describe_counter!(
        "fare_validation_errors_total",
        "Estimate requests rejected by input validation"
    );
    describe_gauge!("coach_fare_info", "Service version information");

    gauge!("coach_fare_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record an estimate outcome
pub fn record_estimate(outcome: &str, bus_type: &str) {
    counter!(
        "fare_estimates_total",
        "outcome" => outcome.to_string(),
        "bus_type" => bus_type.to_string(),
    )
    .increment(1);
}

/// Record a rejected request
pub fn record_validation_error(kind: &str) {
    counter!(
        "fare_validation_errors_total",
        "kind" => kind.to_string(),
    )
    .increment(1);
}

//! Prometheus metrics for the session runtime.
//!
//! All metrics follow the naming convention: `ms_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // COORDINATOR METRICS
    // =========================================================================

    /// Sub-state snapshots pushed to the network/account controllers
    pub static ref COORDINATOR_PROPAGATIONS: CounterVec = CounterVec::new(
        Opts::new("ms_coordinator_propagations_total", "Sub-state replacements pushed to controllers"),
        &["controller"]  // controller: network/account
    ).expect("metric creation failed");

    /// Active namespace switches
    pub static ref COORDINATOR_NAMESPACE_SWITCHES: Counter = Counter::new(
        "ms_coordinator_namespace_switches_total",
        "Total number of active namespace switches"
    ).expect("metric creation failed");

    /// Client resolutions by family and source
    pub static ref COORDINATOR_CLIENT_RESOLUTIONS: CounterVec = CounterVec::new(
        Opts::new("ms_coordinator_client_resolutions_total", "Client handle resolutions"),
        &["family", "source"]  // family: network/connection, source: universal/namespace/error
    ).expect("metric creation failed");

    // =========================================================================
    // STORAGE METRICS
    // =========================================================================

    /// Swallowed storage failures
    pub static ref STORAGE_FAILURES: CounterVec = CounterVec::new(
        Opts::new("ms_storage_failures_total", "Storage failures absorbed at the storage boundary"),
        &["operation"]  // operation: get/set/remove
    ).expect("metric creation failed");

    // =========================================================================
    // CHANGE BUS METRICS
    // =========================================================================

    /// Subscriber callbacks invoked
    pub static ref BUS_NOTIFICATIONS: Counter = Counter::new(
        "ms_bus_notifications_total",
        "Total subscriber callbacks invoked by the change bus"
    ).expect("metric creation failed");
}

/// Handle proving metrics were registered.
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    registered: usize,
}

impl MetricsHandle {
    /// Number of collectors registered by this call.
    pub fn registered(&self) -> usize {
        self.registered
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered collectors are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Coordinator
        Box::new(COORDINATOR_PROPAGATIONS.clone()),
        Box::new(COORDINATOR_NAMESPACE_SWITCHES.clone()),
        Box::new(COORDINATOR_CLIENT_RESOLUTIONS.clone()),
        // Storage
        Box::new(STORAGE_FAILURES.clone()),
        // Change bus
        Box::new(BUS_NOTIFICATIONS.clone()),
    ];

    let mut registered = 0;
    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) => registered += 1,
            Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { registered })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

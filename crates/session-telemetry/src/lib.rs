//! # Session Telemetry
//!
//! Logging and metrics bootstrap for the multichain session runtime.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use session_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // tracing macros and metric counters are live from here on
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `multichain-session` | Service name in logs |
//! | `MS_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honored) |
//! | `MS_JSON_LOGS` | `false` | JSON log lines |
//! | `MS_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `MS_METRICS_ENABLED` | `true` | Register Prometheus counters |

mod config;
mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::LoggingGuard;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, BUS_NOTIFICATIONS,
    COORDINATOR_CLIENT_RESOLUTIONS, COORDINATOR_NAMESPACE_SWITCHES, COORDINATOR_PROPAGATIONS,
    STORAGE_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install log subscriber: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and, when enabled, metrics.
///
/// Hold the returned guard for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = if config.metrics_enabled {
        Some(register_metrics()?)
    } else {
        None
    };

    let logging = logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        _logging: logging,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
    _metrics: Option<MetricsHandle>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("Shutting down telemetry");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Add `amount` to a counter.
#[macro_export]
macro_rules! metric_add {
    ($metric:expr, $amount:expr) => {
        $metric.inc_by($amount as f64)
    };
}

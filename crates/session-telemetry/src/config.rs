//! Telemetry configuration from environment variables.

use std::env;

/// Default service name reported in structured logs.
pub const DEFAULT_SERVICE_NAME: &str = "multichain-session";

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `ms_01_chain_coordinator=debug`
    pub log_level: String,

    /// Whether to enable console output
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Whether to register Prometheus metrics
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

fn flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1"
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: multichain-session)
    /// - `MS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `MS_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `MS_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `MS_METRICS_ENABLED`: Register Prometheus metrics (default: true)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string()),

            log_level: env::var("MS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("MS_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("MS_JSON_LOGS").map(|v| flag(&v)).unwrap_or(false),

            metrics_enabled: env::var("MS_METRICS_ENABLED")
                .map(|v| flag(&v))
                .unwrap_or(true),
        }
    }

    /// Quiet configuration for command-line tools: warnings only.
    pub fn for_cli() -> Self {
        let mut config = Self::from_env();
        if env::var("MS_LOG_LEVEL").is_err() && env::var("RUST_LOG").is_err() {
            config.log_level = "warn".to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "multichain-session");
        assert_eq!(config.log_level, "info");
        assert!(config.metrics_enabled);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_flag_parsing() {
        assert!(flag("TRUE"));
        assert!(flag("1"));
        assert!(!flag("yes"));
        assert!(!flag("0"));
    }
}

//! Telemetry configuration from environment variables.

use std::env;

const DEFAULT_SERVICE_NAME: &str = "formgate";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log filter directive (`info`, `formgate=debug,tower_http=warn`, ...)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// Whether to write JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: formgate)
    /// - `FG_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `FG_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `FG_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            log_level: lookup("FG_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("FG_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("FG_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }
}

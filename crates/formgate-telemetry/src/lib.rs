//! # Formgate Telemetry
//!
//! Structured logging for Formgate services, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formgate_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     tracing::info!("ready");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `formgate` | Service name in log lines |
//! | `FG_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `FG_JSON_LOGS` | `false` (`true` in containers) | JSON lines output |
//! | `FG_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod subscriber;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the global tracing subscriber.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    subscriber::init_subscriber(&config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

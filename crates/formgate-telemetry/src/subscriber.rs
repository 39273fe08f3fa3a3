//! tracing-subscriber registry setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Build the filter from the configured directive.
pub(crate) fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Install the global subscriber.
pub(crate) fn init_subscriber(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config)?;

    if !config.console_output {
        return tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()));
    }

    if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_current_span(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
    }
}

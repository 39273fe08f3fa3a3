//! # Formgate
//!
//! Serves form submissions to API clients behind per-form access control.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration (file, then environment)
//! 3. Seed the object store from the fixture
//! 4. Start the API gateway
//! 5. Wait for Ctrl+C, then drain in-flight requests

use anyhow::Result;
use formgate_telemetry::{init_telemetry, TelemetryConfig};
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env())?;

    let config = NodeConfig::from_env()?;
    let mut runtime = NodeRuntime::new(config)?;
    runtime.start().await?;

    info!("Formgate is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await?;
    Ok(())
}

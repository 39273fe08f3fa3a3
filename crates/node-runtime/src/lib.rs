//! # Node Runtime Library
//!
//! Startup wiring for the Formgate binary, exposed for testing.
//!
//! - `config` - configuration sources
//! - `NodeRuntime` - store, gateway and their lifecycle

pub mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use fg_04_api_gateway::{ApiGatewayService, GatewayDependencies, GatewayMetrics};
use shared_store::{InMemoryObjectStore, StoreFixture};
use tracing::{info, warn};

pub use config::{ConfigError, NodeConfig};

/// The running Formgate node.
pub struct NodeRuntime {
    store: Arc<InMemoryObjectStore>,
    gateway: ApiGatewayService,
}

impl NodeRuntime {
    /// Seed the store and build the gateway.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let store = match &config.fixture {
            Some(path) => {
                let fixture = StoreFixture::from_path(path)
                    .with_context(|| format!("Failed to load fixture {}", path.display()))?;
                InMemoryObjectStore::from_fixture(fixture).context("Invalid store fixture")?
            }
            None => {
                warn!("FG_FIXTURE not set, starting with an empty store");
                InMemoryObjectStore::new()
            }
        };
        let store = Arc::new(store);

        let gateway = ApiGatewayService::new(
            config.gateway,
            GatewayDependencies::in_memory(Arc::clone(&store)),
        )
        .context("Failed to create API gateway")?;

        Ok(Self { store, gateway })
    }

    /// Start serving. Returns the bound address when HTTP is enabled.
    pub async fn start(&mut self) -> Result<Option<SocketAddr>> {
        info!("===========================================");
        info!("  Formgate v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let addr = self.gateway.start().await?;
        if let Some(addr) = addr {
            info!("HTTP: {}", addr);
        }
        info!(submissions = self.store.submission_count(), "Store ready");
        Ok(addr)
    }

    /// Shutdown the node gracefully.
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Initiating graceful shutdown...");
        self.gateway.shutdown().await?;
        info!("Shutdown complete");
        Ok(())
    }

    /// Gateway counters.
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        self.gateway.metrics()
    }

    /// The backing store.
    pub fn store(&self) -> Arc<InMemoryObjectStore> {
        Arc::clone(&self.store)
    }
}

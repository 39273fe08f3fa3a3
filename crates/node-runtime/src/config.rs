//! # Node Configuration
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. JSON file named by `FG_CONFIG`
//! 3. `FG_HTTP_PORT` and `FG_PUBLIC_BASE_URL`
//!
//! `FG_FIXTURE` names the JSON file the in-memory store is seeded from.

use fg_04_api_gateway::GatewayConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// API Gateway configuration.
    pub gateway: GatewayConfig,
    /// Store fixture to load at startup.
    pub fixture: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

impl NodeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut gateway = match lookup("FG_CONFIG") {
            Some(path) => read_gateway_config(Path::new(&path))?,
            None => GatewayConfig::default(),
        };

        if let Some(port) = lookup("FG_HTTP_PORT") {
            gateway.http.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "FG_HTTP_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(base_url) = lookup("FG_PUBLIC_BASE_URL") {
            gateway.public_base_url = base_url;
        }

        Ok(Self {
            gateway,
            fixture: lookup("FG_FIXTURE").map(PathBuf::from),
        })
    }
}

fn read_gateway_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

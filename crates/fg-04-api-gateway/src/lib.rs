//! # API Gateway (fg-04)
//!
//! HTTP surface of Formgate.
//!
//! ```text
//! request ─► Cors ─► Tracing ─► Metrics ─► Timeout ─► Identity ─► Guard ─► handler
//!                                                        │           │
//!                                                 ApiKeyDirectory   AccessControlApi
//! ```
//!
//! - `Identity` turns an API key into an [`Identity`](shared_types::Identity)
//!   stored in the request extensions.
//! - `Guard` resolves the form a request targets and rejects callers the
//!   access policy denies before the handler runs.
//! - Handlers call the query and enrichment services and map domain errors
//!   onto HTTP statuses through [`ApiError`].
//!
//! ## Usage
//!
//! ```ignore
//! let deps = GatewayDependencies::in_memory(Arc::new(store));
//! let mut gateway = ApiGatewayService::new(GatewayConfig::default(), deps)?;
//! gateway.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod rest;
pub mod service;

pub use domain::config::{
    AccessConfig, ConfigError, CorsConfig, GatewayConfig, HttpConfig, LimitsConfig, TimeoutConfig,
};
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use middleware::GatewayMetrics;
pub use rest::AppState;
pub use service::{ApiGatewayService, GatewayDependencies};

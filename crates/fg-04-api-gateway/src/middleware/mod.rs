//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Cors → Tracing → Metrics → Timeout → Identity → Guard → Handler

pub mod cors;
pub mod guard;
pub mod identity;
pub mod metrics;
pub mod timeout;
pub mod tracing;

pub use cors::create_cors_layer;
pub use guard::{classify_route, GuardLayer, GuardedRoute, RouteKind};
pub use identity::{extract_api_key, IdentityLayer};
pub use metrics::{GatewayMetrics, MetricsLayer, RequestTimer};
pub use timeout::TimeoutLayer;
pub use tracing::TracingLayer;

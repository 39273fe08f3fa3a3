//! Request timeout middleware.

use crate::domain::config::TimeoutConfig;
use crate::domain::error::ApiError;
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tower::{Layer, Service};
use tracing::warn;

/// Timeout layer
#[derive(Clone)]
pub struct TimeoutLayer {
    config: Arc<TimeoutConfig>,
}

impl TimeoutLayer {
    pub fn new(config: TimeoutConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Timeout service
#[derive(Clone)]
pub struct TimeoutService<S> {
    inner: S,
    config: Arc<TimeoutConfig>,
}

impl<S> Service<Request<Body>> for TimeoutService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let limit = self.config.default;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match timeout(limit, inner.call(req)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(timeout_ms = limit.as_millis() as u64, "Request timed out");
                    Ok(timeout_response(limit))
                }
            }
        })
    }
}

fn timeout_response(limit: Duration) -> Response {
    ApiError::timeout(format!("Request exceeded {}ms timeout", limit.as_millis())).into_response()
}

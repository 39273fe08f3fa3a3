//! Identity resolution middleware.
//!
//! Resolves the caller from an API key and stores the resulting [`Identity`]
//! in the request extensions. Key sources, first match wins:
//!
//! 1. `api-key` query parameter
//! 2. `X-API-Key` header
//! 3. `Authorization: Bearer <key>`
//!
//! A missing or unknown key yields the anonymous identity. Rejecting
//! anonymous callers is the guard's job, not this layer's.

use crate::domain::error::ApiError;
use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use shared_store::ApiKeyDirectory;
use shared_types::Identity;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::debug;

/// Query parameter carrying an API key
pub const API_KEY_QUERY_PARAM: &str = "api-key";

/// Header carrying an API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Identity layer
#[derive(Clone)]
pub struct IdentityLayer {
    directory: Arc<dyn ApiKeyDirectory>,
}

impl IdentityLayer {
    pub fn new(directory: Arc<dyn ApiKeyDirectory>) -> Self {
        Self { directory }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityService {
            inner,
            directory: Arc::clone(&self.directory),
        }
    }
}

/// Identity service
#[derive(Clone)]
pub struct IdentityService<S> {
    inner: S,
    directory: Arc<dyn ApiKeyDirectory>,
}

impl<S> Service<Request<Body>> for IdentityService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let directory = Arc::clone(&self.directory);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let identity = match extract_api_key(&req) {
                None => Identity::anonymous(),
                Some(key) => match directory.user_for_api_key(&key) {
                    Ok(Some(user)) => Identity::api_key(user.id),
                    Ok(None) => {
                        debug!("Unknown API key, continuing as anonymous");
                        Identity::anonymous()
                    }
                    Err(e) => return Ok(ApiError::internal(e).into_response()),
                },
            };

            req.extensions_mut().insert(identity);
            inner.call(req).await
        })
    }
}

/// Find the API key presented by a request, if any
pub fn extract_api_key<B>(req: &Request<B>) -> Option<String> {
    if let Some(query) = req.uri().query() {
        // Form decoding: '+' is a space
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();
        if let Some((_, key)) = pairs
            .into_iter()
            .find(|(name, value)| name == API_KEY_QUERY_PARAM && !value.is_empty())
        {
            return Some(key);
        }
    }

    if let Some(key) = header_value(req, API_KEY_HEADER) {
        return Some(key);
    }

    header_value(req, header::AUTHORIZATION.as_str()).and_then(|value| {
        value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    })
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

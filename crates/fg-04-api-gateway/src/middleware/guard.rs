//! Request guard: per-form access enforcement ahead of every form route.
//!
//! The guard resolves the targeted form exactly the way the handlers will,
//! then asks the access policy whether the caller may proceed. A denied
//! request never reaches its handler. Unknown forms are let through so the
//! handler can answer 404 itself.

use crate::domain::error::ApiError;
use crate::middleware::metrics::GatewayMetrics;
use axum::{
    body::{Body, Bytes},
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use fg_01_access_control::AccessControlApi;
use serde_json::Value;
use shared_types::Identity;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Body key naming the targeted form on write requests
pub const FORM_ID_KEY: &str = "webform_id";

/// Body key naming the targeted submission on write requests
pub const SUBMISSION_UUID_KEY: &str = "submission_uuid";

/// How a guarded route carries its ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Ids come from the path
    Read,
    /// Ids come from the JSON body, falling back to the path
    Write,
    /// Creates a submission: only the body's form id counts
    Create,
}

/// A request matched against the guarded route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedRoute {
    pub kind: RouteKind,
    pub form_id: Option<String>,
    pub submission_uuid: Option<String>,
}

impl GuardedRoute {
    fn read(form_id: &str, submission_uuid: Option<&str>) -> Self {
        Self {
            kind: RouteKind::Read,
            form_id: Some(decode_segment(form_id)),
            submission_uuid: submission_uuid.map(decode_segment),
        }
    }

    fn create() -> Self {
        Self {
            kind: RouteKind::Create,
            form_id: None,
            submission_uuid: None,
        }
    }

    fn write(form_id: Option<&str>, submission_uuid: Option<&str>) -> Self {
        Self {
            kind: RouteKind::Write,
            form_id: form_id.map(decode_segment),
            submission_uuid: submission_uuid.map(decode_segment),
        }
    }
}

/// Match a request against the guarded routes.
///
/// Returns `None` for requests the guard does not cover. `HEAD` is guarded
/// like `GET` since the router answers it with the same handler.
pub fn classify_route(method: &Method, path: &str) -> Option<GuardedRoute> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (&Method::POST, ["forms", "submit"]) => Some(GuardedRoute::create()),
        (&Method::GET | &Method::HEAD, ["forms", id, "elements" | "fields" | "submissions"]) => {
            Some(GuardedRoute::read(id, None))
        }
        (&Method::GET | &Method::HEAD, ["forms", id, "submissions", uuid]) => {
            Some(GuardedRoute::read(id, Some(*uuid)))
        }
        (&Method::PATCH, ["forms", id, "submissions", uuid]) => {
            Some(GuardedRoute::write(Some(*id), Some(*uuid)))
        }
        _ => None,
    }
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// Ids named by a write request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyIds {
    pub form_id: Option<String>,
    pub submission_uuid: Option<String>,
}

/// Read `webform_id` and `submission_uuid` from a JSON body.
///
/// Both may be strings or numbers. A body that is not a JSON object names
/// nothing.
pub fn body_ids(body: &[u8]) -> BodyIds {
    let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
        return BodyIds::default();
    };

    BodyIds {
        form_id: map.get(FORM_ID_KEY).and_then(scalar_id),
        submission_uuid: map.get(SUBMISSION_UUID_KEY).and_then(scalar_id),
    }
}

fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Combine path and body ids of a write request.
///
/// The body wins when it names a form. A body id that contradicts the path
/// is rejected. A create request never targets an existing submission, so
/// its body uuid is ignored.
pub fn merge_write_ids(
    route: &GuardedRoute,
    mut body: BodyIds,
) -> Result<(Option<String>, Option<String>), ApiError> {
    if route.kind == RouteKind::Create {
        body.submission_uuid = None;
    }
    let form_id = pick(route.form_id.as_ref(), body.form_id, FORM_ID_KEY)?;
    let submission_uuid = pick(
        route.submission_uuid.as_ref(),
        body.submission_uuid,
        SUBMISSION_UUID_KEY,
    )?;
    Ok((form_id, submission_uuid))
}

fn pick(
    from_path: Option<&String>,
    from_body: Option<String>,
    key: &str,
) -> Result<Option<String>, ApiError> {
    match (from_path, from_body) {
        (Some(path), Some(body)) if *path != body => Err(ApiError::bad_request(format!(
            "{} does not match the request path",
            key
        ))),
        (_, Some(body)) => Ok(Some(body)),
        (path, None) => Ok(path.cloned()),
    }
}

/// Guard layer
#[derive(Clone)]
pub struct GuardLayer {
    access: Arc<dyn AccessControlApi>,
    metrics: Arc<GatewayMetrics>,
    max_body_size: usize,
}

impl GuardLayer {
    pub fn new(
        access: Arc<dyn AccessControlApi>,
        metrics: Arc<GatewayMetrics>,
        max_body_size: usize,
    ) -> Self {
        Self {
            access,
            metrics,
            max_body_size,
        }
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardService {
            inner,
            access: Arc::clone(&self.access),
            metrics: Arc::clone(&self.metrics),
            max_body_size: self.max_body_size,
        }
    }
}

/// Guard service
#[derive(Clone)]
pub struct GuardService<S> {
    inner: S,
    access: Arc<dyn AccessControlApi>,
    metrics: Arc<GatewayMetrics>,
    max_body_size: usize,
}

impl<S> Service<Request<Body>> for GuardService<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let access = Arc::clone(&self.access);
        let metrics = Arc::clone(&self.metrics);
        let max_body_size = self.max_body_size;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(route) = classify_route(req.method(), req.uri().path()) else {
                return inner.call(req).await;
            };

            let identity = req
                .extensions()
                .get::<Identity>()
                .copied()
                .unwrap_or_default();

            let (req, ids) = match route.kind {
                RouteKind::Read => {
                    let ids = (route.form_id.clone(), route.submission_uuid.clone());
                    (req, Ok(ids))
                }
                RouteKind::Write | RouteKind::Create => {
                    let (parts, body) = req.into_parts();
                    let bytes: Bytes = match axum::body::to_bytes(body, max_body_size).await {
                        Ok(bytes) => bytes,
                        Err(e) => {
                            warn!(error = %e, "Failed to buffer request body for access check");
                            metrics.record_guard_rejection();
                            return Ok(ApiError::payload_too_large(max_body_size).into_response());
                        }
                    };
                    let ids = merge_write_ids(&route, body_ids(&bytes));
                    (Request::from_parts(parts, Body::from(bytes)), ids)
                }
            };

            let (form_id, submission_uuid) = match ids {
                Ok((Some(form_id), uuid)) => (form_id, uuid),
                Ok((None, _)) => {
                    metrics.record_guard_rejection();
                    return Ok(ApiError::bad_request("missing form id").into_response());
                }
                Err(e) => {
                    metrics.record_guard_rejection();
                    return Ok(e.into_response());
                }
            };

            let form = match access.resolve_form(&form_id, submission_uuid.as_deref()) {
                Ok(form) => form,
                Err(e) if e.is_not_found() => {
                    debug!(form_id = %form_id, "Guarded form not found, deferring to handler");
                    return inner.call(req).await;
                }
                Err(e) => return Ok(ApiError::from(e).into_response()),
            };

            match access.is_allowed(&form, &identity) {
                Ok(true) => inner.call(req).await,
                Ok(false) => {
                    metrics.record_access_denied();
                    warn!(
                        form_id = %form.id,
                        user_id = identity.id,
                        anonymous = identity.is_anonymous(),
                        "Access denied"
                    );
                    Ok(ApiError::access_denied(identity.is_anonymous()).into_response())
                }
                Err(e) => Ok(ApiError::from(e).into_response()),
            }
        })
    }
}

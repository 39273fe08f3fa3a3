//! Per-request tracing spans.
//!
//! Each request runs inside an `api_request` span. A W3C `traceparent`
//! header, when present, is linked as the span's cause.

use axum::{body::Body, http::Request, response::Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{info_span, Instrument, Span};

/// Tracing layer that creates spans for each request
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Tracing service
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
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
        let mut inner = self.inner.clone();

        let parent_context = extract_trace_context(&req);
        let span = info_span!(
            "api_request",
            http.method = %req.method(),
            http.target = %req.uri().path(),
            http.status_code = tracing::field::Empty,
            otel.kind = "server",
            otel.status_code = tracing::field::Empty,
        );

        if let Some(parent) = parent_context {
            span.follows_from(parent);
        }

        Box::pin(
            async move {
                let result = inner.call(req).await;

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        let span = Span::current();
                        span.record("http.status_code", status.as_u16());
                        span.record(
                            "otel.status_code",
                            if status.is_server_error() { "ERROR" } else { "OK" },
                        );
                    }
                    Err(_) => {
                        Span::current().record("otel.status_code", "ERROR");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Extract trace context from request headers (W3C Trace Context)
fn extract_trace_context<B>(req: &Request<B>) -> Option<Span> {
    let traceparent = req.headers().get("traceparent")?.to_str().ok()?;

    // version-trace_id-parent_id-trace_flags
    let parts: Vec<&str> = traceparent.split('-').collect();
    if parts.len() != 4 {
        return None;
    }

    Some(info_span!(
        "parent_trace",
        trace_id = parts[1],
        parent_span_id = parts[2]
    ))
}

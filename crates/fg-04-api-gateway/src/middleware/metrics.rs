//! Gateway counters and the request metrics layer.
//!
//! Counters are exposed as JSON on `/admin/metrics`.

use axum::{body::Body, http::Request, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// API Gateway metrics
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,
    pub write_requests_total: AtomicU64,

    // Access counters
    pub access_denied: AtomicU64,
    pub guard_rejections: AtomicU64,
    pub download_vetoes: AtomicU64,

    // Enrichment
    pub enrichment_skipped: AtomicU64,

    // Latency tracking
    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request
    pub fn record_request(&self, success: bool, is_write: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        if is_write {
            self.write_requests_total.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request denied by the access policy
    pub fn record_access_denied(&self) {
        self.access_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request rejected by the guard before any policy ran
    pub fn record_guard_rejection(&self) {
        self.guard_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a download denied by the download gate
    pub fn record_download_veto(&self) {
        self.download_vetoes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record enrichment entries dropped on a recoverable failure
    pub fn record_enrichment_skipped(&self, count: usize) {
        self.enrichment_skipped
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
                "writes": self.write_requests_total.load(Ordering::Relaxed),
            },
            "access": {
                "denied": self.access_denied.load(Ordering::Relaxed),
                "guard_rejections": self.guard_rejections.load(Ordering::Relaxed),
                "download_vetoes": self.download_vetoes.load(Ordering::Relaxed),
            },
            "enrichment": {
                "skipped": self.enrichment_skipped.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    is_write: bool,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, is_write: bool) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            is_write,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.metrics
            .record_request(success, self.is_write, latency_ms);
    }
}

/// Layer timing every request into [`GatewayMetrics`]
#[derive(Clone)]
pub struct MetricsLayer {
    metrics: Arc<GatewayMetrics>,
}

impl MetricsLayer {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Metrics service
#[derive(Clone)]
pub struct MetricsService<S> {
    inner: S,
    metrics: Arc<GatewayMetrics>,
}

impl<S> Service<Request<Body>> for MetricsService<S>
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
        let is_write = req.method() == axum::http::Method::POST
            || req.method() == axum::http::Method::PATCH;
        let timer = RequestTimer::new(Arc::clone(&self.metrics), is_write);

        Box::pin(async move {
            let result = inner.call(req).await;
            let success = matches!(&result, Ok(response) if !response.status().is_server_error()
                && !response.status().is_client_error());
            timer.finish(success);
            result
        })
    }
}

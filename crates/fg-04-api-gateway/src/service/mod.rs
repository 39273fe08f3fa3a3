//! API Gateway service: wiring, router and server lifecycle.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::middleware::{
    create_cors_layer, GatewayMetrics, GuardLayer, IdentityLayer, MetricsLayer, TimeoutLayer,
    TracingLayer,
};
use crate::rest::{self, AppState};
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use fg_01_access_control::{
    AccessControlApi, AccessControlService, AccessPolicyConfig, StaticCapabilityEvaluator,
    VIEW_ANY_CAPABILITY,
};
use fg_02_submission_query::{SubmissionQueryService, SubmissionUrlBuilder};
use fg_03_submission_enrichment::{BaseUrlFileResolver, EnricherDependencies, SubmissionEnricher};
use shared_store::{ApiKeyDirectory, InMemoryObjectStore, ObjectStore, SubmissionWriter};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tracing::{error, info};


/// Storage collaborators of the gateway
#[derive(Clone)]
pub struct GatewayDependencies {
    pub store: Arc<dyn ObjectStore>,
    pub writer: Arc<dyn SubmissionWriter>,
    pub api_keys: Arc<dyn ApiKeyDirectory>,
}

impl GatewayDependencies {
    /// All three ports served by one in-memory store
    pub fn in_memory(store: Arc<InMemoryObjectStore>) -> Self {
        Self {
            store: store.clone(),
            writer: store.clone(),
            api_keys: store,
        }
    }
}

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
    api_keys: Arc<dyn ApiKeyDirectory>,
    metrics: Arc<GatewayMetrics>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<Result<(), std::io::Error>>>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: GatewayConfig, deps: GatewayDependencies) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let base_url = config.public_base_url.trim_end_matches('/').to_string();

        let mut capabilities = StaticCapabilityEvaluator::new();
        for user in &config.access.view_any_users {
            capabilities = capabilities.grant(VIEW_ANY_CAPABILITY, *user);
        }
        if config.access.anonymous_view_any {
            capabilities = capabilities.grant_anonymous(VIEW_ANY_CAPABILITY);
        }

        let access: Arc<dyn AccessControlApi> = Arc::new(AccessControlService::new(
            Arc::clone(&deps.store),
            Arc::new(capabilities),
            AccessPolicyConfig {
                open_when_allow_list_empty: config.access.open_when_allow_list_empty,
            },
        ));

        let metrics = Arc::new(GatewayMetrics::new());

        let state = AppState {
            access,
            query: Arc::new(SubmissionQueryService::new(Arc::clone(&deps.store))),
            enricher: Arc::new(SubmissionEnricher::new(EnricherDependencies::with_base_url(
                Arc::clone(&deps.store),
                &base_url,
            ))),
            store: deps.store,
            writer: deps.writer,
            files: Arc::new(BaseUrlFileResolver::new(&base_url)),
            urls: Arc::new(SubmissionUrlBuilder::new(base_url.as_str())),
            metrics: Arc::clone(&metrics),
        };

        Ok(Self {
            config,
            state,
            api_keys: deps.api_keys,
            metrics,
            shutdown_tx: None,
            server: None,
        })
    }

    /// Bind the HTTP listener and serve in the background.
    ///
    /// Returns the bound address, which differs from the configured one when
    /// the configured port is 0.
    pub async fn start(&mut self) -> Result<Option<SocketAddr>, GatewayError> {
        if !self.config.http.enabled {
            info!("HTTP server disabled");
            return Ok(None);
        }

        info!("Starting API Gateway...");

        let listener = tokio::net::TcpListener::bind(self.config.http_addr())
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        let router = self.router();
        self.server = Some(tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        }));

        info!(addr = %addr, "API Gateway started successfully");
        Ok(Some(addr))
    }

    /// Trigger graceful shutdown and wait for in-flight requests
    pub async fn shutdown(&mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            info!("Received shutdown signal");
            let _ = tx.send(());
        }

        if let Some(server) = self.server.take() {
            match server.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "HTTP server error");
                    return Err(GatewayError::Serve(e.to_string()));
                }
                Err(e) => return Err(GatewayError::Serve(e.to_string())),
            }
        }

        info!("API Gateway stopped");
        Ok(())
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the HTTP router with the full middleware stack
    pub fn router(&self) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new())
            .layer(MetricsLayer::new(Arc::clone(&self.metrics)))
            .layer(TimeoutLayer::new(self.config.timeouts.clone()))
            .layer(IdentityLayer::new(Arc::clone(&self.api_keys)))
            .layer(GuardLayer::new(
                Arc::clone(&self.state.access),
                Arc::clone(&self.metrics),
                self.config.limits.max_request_size,
            ));

        rest::routes()
            .route("/health", get(health_check))
            .route("/admin/metrics", get(metrics_snapshot))
            .layer(middleware)
            .with_state(self.state.clone())
    }
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "formgate",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.to_json())
}

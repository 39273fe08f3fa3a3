//! REST handlers.
//!
//! Every form route runs behind the guard, so handlers only repeat the access
//! check where the response itself depends on it (the listing).

pub mod files;
pub mod forms;
pub mod submissions;

use crate::middleware::GatewayMetrics;
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use fg_01_access_control::AccessControlApi;
use fg_02_submission_query::{SubmissionQueryApi, SubmissionUrlBuilder};
use fg_03_submission_enrichment::{FileUrlResolver, SubmissionEnrichmentApi};
use shared_store::{ObjectStore, SubmissionWriter};
use shared_types::Identity;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub access: Arc<dyn AccessControlApi>,
    pub query: Arc<dyn SubmissionQueryApi>,
    pub enricher: Arc<dyn SubmissionEnrichmentApi>,
    pub store: Arc<dyn ObjectStore>,
    pub writer: Arc<dyn SubmissionWriter>,
    pub files: Arc<dyn FileUrlResolver>,
    pub urls: Arc<SubmissionUrlBuilder>,
    pub metrics: Arc<GatewayMetrics>,
}

/// Form and file routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forms/submit", post(submissions::submit))
        .route("/forms/:form_id/elements", get(forms::elements))
        .route("/forms/:form_id/fields", get(forms::fields))
        .route("/forms/:form_id/submissions", get(submissions::list))
        .route(
            "/forms/:form_id/submissions/:uuid",
            get(submissions::show).patch(submissions::update),
        )
        .route("/files/*path", get(files::download))
}

/// Identity placed by the identity layer, anonymous when absent
pub(crate) fn caller(identity: Option<Extension<Identity>>) -> Identity {
    identity.map(|Extension(identity)| identity).unwrap_or_default()
}

//! Submission endpoints: listing, retrieval, update and creation.

use super::{caller, AppState};
use crate::domain::error::{ApiError, ApiResult};
use crate::middleware::guard::{FORM_ID_KEY, SUBMISSION_UUID_KEY};
use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use fg_02_submission_query::{parse_time_param, SubmissionListing, TimeWindow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_store::SubmissionQuery;
use shared_types::{Form, Identity, Submission, Timestamp};
use tracing::{debug, info};

/// Query parameters of the listing endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub starttime: Option<String>,
    pub endtime: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EntityView {
    pub uuid: String,
    pub webform_id: String,
    pub created: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct SubmissionView {
    pub entity: EntityView,
    pub data: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct CreatedView {
    pub sid: String,
}

/// Body of `PATCH /forms/:form_id/submissions/:uuid`
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// `GET /forms/:form_id/submissions?starttime=&endtime=`
pub async fn list(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
    Query(params): Query<ListParams>,
    identity: Option<Extension<Identity>>,
) -> ApiResult<Json<SubmissionListing>> {
    let identity = caller(identity);
    let form = state.access.resolve_form(&form_id, None)?;

    if !state.access.is_allowed(&form, &identity)? {
        state.metrics.record_access_denied();
        return Err(ApiError::access_denied(identity.is_anonymous()));
    }

    let start = parse_optional("starttime", params.starttime.as_deref())?;
    let end = parse_optional("endtime", params.endtime.as_deref())?;
    let handles = state.query.list_submissions(&form, TimeWindow::new(start, end))?;

    debug!(form_id = %form.id, count = handles.len(), "Listed submissions");

    Ok(Json(
        SubmissionListing::new(form.id)
            .with_filters(params.starttime.as_deref(), params.endtime.as_deref())
            .with_handles(&handles, &state.urls),
    ))
}

fn parse_optional(name: &str, raw: Option<&str>) -> ApiResult<Option<Timestamp>> {
    match raw {
        Some(raw) => Ok(parse_time_param(name, raw)?),
        None => Ok(None),
    }
}

/// `GET /forms/:form_id/submissions/:uuid`
pub async fn show(
    State(state): State<AppState>,
    Path((form_id, uuid)): Path<(String, String)>,
) -> ApiResult<Json<SubmissionView>> {
    let form = state.access.resolve_form(&form_id, Some(&uuid))?;
    let submission = find_submission(&state, &uuid)?;
    render(&state, &form, submission).map(Json)
}

/// `PATCH /forms/:form_id/submissions/:uuid`
pub async fn update(
    State(state): State<AppState>,
    Path((form_id, uuid)): Path<(String, String)>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Json<SubmissionView>> {
    let form = state.access.resolve_form(&form_id, Some(&uuid))?;

    let updated = state
        .writer
        .patch_submission(&uuid, body.data)?
        .ok_or_else(|| ApiError::not_found("Submission"))?;

    info!(form_id = %form.id, uuid = %uuid, "Submission updated");
    render(&state, &form, updated).map(Json)
}

/// `POST /forms/submit`
///
/// Every body key except the routing keys becomes submission data.
pub async fn submit(
    State(state): State<AppState>,
    identity: Option<Extension<Identity>>,
    Json(body): Json<Value>,
) -> ApiResult<Json<CreatedView>> {
    let identity = caller(identity);
    let Value::Object(mut data) = body else {
        return Err(ApiError::bad_request("request body must be a JSON object"));
    };

    let form_id = match data.remove(FORM_ID_KEY) {
        Some(Value::String(id)) if !id.is_empty() => id,
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(ApiError::bad_request("missing form id")),
    };
    data.remove(SUBMISSION_UUID_KEY);

    let form = state.access.resolve_form(&form_id, None)?;
    if !state.access.is_allowed(&form, &identity)? {
        state.metrics.record_access_denied();
        return Err(ApiError::access_denied(identity.is_anonymous()));
    }

    let created = chrono::Utc::now().timestamp();
    let handle = state.writer.create_submission(&form.id, data, created)?;

    info!(form_id = %form.id, uuid = %handle.uuid, "Submission created");
    Ok(Json(CreatedView { sid: handle.uuid }))
}

fn find_submission(state: &AppState, uuid: &str) -> ApiResult<Submission> {
    let handle = state
        .store
        .query_submissions(&SubmissionQuery::by_uuid(uuid))?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("Submission"))?;

    state
        .store
        .load_submission(handle.id)?
        .ok_or_else(|| ApiError::not_found("Submission"))
}

fn render(state: &AppState, form: &Form, submission: Submission) -> ApiResult<SubmissionView> {
    let (data, report) = state
        .enricher
        .enrich_with_report(form, &submission, &submission.data)?;

    if report.skipped > 0 {
        state.metrics.record_enrichment_skipped(report.skipped);
    }

    Ok(SubmissionView {
        entity: EntityView {
            uuid: submission.uuid,
            webform_id: submission.form_id,
            created: submission.created,
        },
        data,
    })
}

//! File download gate.
//!
//! `GET /files/<scheme>/<path>` addresses the stored file `<scheme>://<path>`.
//! The download gate may veto the request. Otherwise the file's metadata is
//! returned; serving file bytes is left to the storage layer.

use super::{caller, AppState};
use crate::domain::error::{ApiError, ApiResult};
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use fg_01_access_control::PolicyVerdict;
use serde::Serialize;
use shared_types::Identity;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct FileView {
    pub id: String,
    pub filename: String,
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub size: u64,
    pub url: String,
}

/// Turn the wildcard tail into a stream-wrapper URI.
pub fn file_uri(path: &str) -> Option<String> {
    let (scheme, rest) = path.trim_start_matches('/').split_once('/')?;
    if scheme.is_empty() || rest.is_empty() {
        return None;
    }
    Some(format!("{}://{}", scheme, rest))
}

/// `GET /files/*path`
pub async fn download(
    State(state): State<AppState>,
    Path(path): Path<String>,
    identity: Option<Extension<Identity>>,
) -> ApiResult<Json<FileView>> {
    let identity = caller(identity);
    let uri = file_uri(&path).ok_or_else(|| ApiError::not_found("File"))?;

    if state.access.check_download(&uri, &identity)? == PolicyVerdict::Deny {
        state.metrics.record_download_veto();
        info!(uri = %uri, user_id = identity.id, "Download vetoed");
        return Err(ApiError::forbidden());
    }

    let file = state
        .store
        .load_file_by_uri(&uri)?
        .ok_or_else(|| ApiError::not_found("File"))?;

    Ok(Json(FileView {
        url: state.files.file_url(&file),
        id: file.id,
        filename: file.filename,
        uri: file.uri,
        mime_type: file.mime_type,
        size: file.size,
    }))
}

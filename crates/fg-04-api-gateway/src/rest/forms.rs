//! Form structure endpoints.

use super::AppState;
use crate::domain::error::ApiResult;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared_types::ElementDescriptor;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct ElementView {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

impl From<&ElementDescriptor> for ElementView {
    fn from(element: &ElementDescriptor) -> Self {
        Self {
            type_tag: element.type_tag.clone(),
            title: element.title.clone(),
            target_type: element.target_type.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ElementsResponse {
    pub webform_id: String,
    pub elements: BTreeMap<String, ElementView>,
}

#[derive(Debug, Serialize)]
pub struct FieldView {
    pub key: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub title: String,
}

/// `GET /forms/:form_id/elements`
pub async fn elements(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
) -> ApiResult<Json<ElementsResponse>> {
    let form = state.access.resolve_form(&form_id, None)?;

    Ok(Json(ElementsResponse {
        elements: form
            .elements
            .iter()
            .map(|element| (element.key.clone(), ElementView::from(element)))
            .collect(),
        webform_id: form.id,
    }))
}

/// `GET /forms/:form_id/fields`
///
/// Elements in form order. An untitled element uses its key as title.
pub async fn fields(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
) -> ApiResult<Json<Vec<FieldView>>> {
    let form = state.access.resolve_form(&form_id, None)?;

    Ok(Json(
        form.elements
            .iter()
            .map(|element| FieldView {
                key: element.key.clone(),
                type_tag: element.type_tag.clone(),
                title: element.title.clone().unwrap_or_else(|| element.key.clone()),
            })
            .collect(),
    ))
}

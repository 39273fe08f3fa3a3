//! Linked object references.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A resolved file reference. Serializes to exactly four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedReference {
    pub id: String,
    pub url: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub size: u64,
}

/// `element key -> reference id -> resolved reference`.
pub type LinkedMap = BTreeMap<String, BTreeMap<String, LinkedReference>>;

/// Normalize a payload value to reference ids.
///
/// A lone scalar becomes a one-element list. Strings and numbers count as
/// ids; anything else, including empty strings, is ignored.
pub fn reference_ids(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_id).collect(),
        other => scalar_id(other).into_iter().collect(),
    }
}

fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

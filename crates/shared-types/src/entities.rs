//! # Core Domain Entities
//!
//! Defines the entities Formgate reads from the object store.
//!
//! ## Clusters
//!
//! - **Forms**: `Form`, `ElementDescriptor`, `ElementReference`
//! - **Submissions**: `Submission`, `SubmissionHandle`
//! - **Linked objects**: `User`, `FileObject`, `LinkedEntity`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// Internal user identifier. `0` is the anonymous user.
pub type UserId = u64;

/// Internal submission identifier. Never part of a public response.
pub type SubmissionId = u64;

/// Object type name of uploaded files in the store.
pub const FILE_OBJECT_TYPE: &str = "file";

/// Element type tags that store uploaded file ids without declaring a
/// target type.
pub const LEGACY_FILE_ELEMENT_TYPES: &[&str] = &[
    "webform_image_file",
    "webform_document_file",
    "webform_video_file",
    "webform_audio_file",
    "managed_file",
];

// =============================================================================
// CLUSTER A: FORMS
// =============================================================================

/// What kind of stored object an element's submitted values point at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementReference {
    /// Element declares an explicit target object type.
    Direct { target_type: String },
    /// One of the legacy upload element types; values are file ids.
    LegacyFileUpload,
    /// Values are literals.
    Plain,
}

impl ElementReference {
    /// Classify an element from its type tag and optional target type.
    ///
    /// An explicit target type always wins over the legacy upload table.
    pub fn classify(type_tag: &str, target_type: Option<&str>) -> Self {
        match target_type {
            Some(target) if !target.is_empty() => ElementReference::Direct {
                target_type: target.to_string(),
            },
            _ if LEGACY_FILE_ELEMENT_TYPES.contains(&type_tag) => {
                ElementReference::LegacyFileUpload
            }
            _ => ElementReference::Plain,
        }
    }

    /// Object type the element's values reference, if any.
    pub fn object_type(&self) -> Option<&str> {
        match self {
            ElementReference::Direct { target_type } => Some(target_type.as_str()),
            ElementReference::LegacyFileUpload => Some(FILE_OBJECT_TYPE),
            ElementReference::Plain => None,
        }
    }
}

/// Serialized shape of an element as stored with its form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub key: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_type: Option<String>,
}

/// A form element with its reference classification computed at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ElementRecord", into = "ElementRecord")]
pub struct ElementDescriptor {
    /// Element name; also the payload key for submitted values.
    pub key: String,
    /// Element type tag (e.g. `textfield`, `managed_file`).
    pub type_tag: String,
    /// Display title.
    pub title: Option<String>,
    /// Explicit target object type for entity reference elements.
    pub target_type: Option<String>,
    /// Export format of attachment elements.
    pub export_type: Option<String>,
    reference: ElementReference,
}

impl ElementDescriptor {
    pub fn new(key: impl Into<String>, type_tag: impl Into<String>) -> Self {
        let type_tag = type_tag.into();
        let reference = ElementReference::classify(&type_tag, None);
        Self {
            key: key.into(),
            type_tag,
            title: None,
            target_type: None,
            export_type: None,
            reference,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_target_type(mut self, target_type: impl Into<String>) -> Self {
        let target_type = target_type.into();
        self.reference = ElementReference::classify(&self.type_tag, Some(&target_type));
        self.target_type = Some(target_type);
        self
    }

    pub fn with_export_type(mut self, export_type: impl Into<String>) -> Self {
        self.export_type = Some(export_type.into());
        self
    }

    /// Classification computed when the descriptor was built.
    pub fn reference(&self) -> &ElementReference {
        &self.reference
    }
}

impl From<ElementRecord> for ElementDescriptor {
    fn from(record: ElementRecord) -> Self {
        let reference = ElementReference::classify(&record.type_tag, record.target_type.as_deref());
        Self {
            key: record.key,
            type_tag: record.type_tag,
            title: record.title,
            target_type: record.target_type,
            export_type: record.export_type,
            reference,
        }
    }
}

impl From<ElementDescriptor> for ElementRecord {
    fn from(element: ElementDescriptor) -> Self {
        Self {
            key: element.key,
            type_tag: element.type_tag,
            title: element.title,
            target_type: element.target_type,
            export_type: element.export_type,
        }
    }
}

/// A form definition.
///
/// Created and edited by form-design tooling; read-only inside Formgate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// Stable, unique form identifier.
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Elements in declaration order.
    #[serde(default)]
    pub elements: Vec<ElementDescriptor>,
    /// Raw allow-list setting. May hold duplicates or ids of deleted users.
    #[serde(default)]
    pub allowed_users: Vec<UserId>,
}

impl Form {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            elements: Vec::new(),
            allowed_users: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: ElementDescriptor) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_allowed_users(mut self, users: impl IntoIterator<Item = UserId>) -> Self {
        self.allowed_users = users.into_iter().collect();
        self
    }

    /// Look up an element by key.
    pub fn element(&self, key: &str) -> Option<&ElementDescriptor> {
        self.elements.iter().find(|e| e.key == key)
    }
}

// =============================================================================
// CLUSTER B: SUBMISSIONS
// =============================================================================

/// One filled-in instance of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Internal id; storage-defined and not a public contract.
    pub id: SubmissionId,
    /// Externally stable handle.
    pub uuid: String,
    /// Owning form. The form must exist.
    pub form_id: String,
    /// Creation time.
    pub created: Timestamp,
    /// Element name to submitted value(s).
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// `(id, uuid)` projection returned by submission queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionHandle {
    pub id: SubmissionId,
    pub uuid: String,
}

impl From<&Submission> for SubmissionHandle {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            uuid: submission.uuid.clone(),
        }
    }
}

// =============================================================================
// CLUSTER C: LINKED OBJECTS
// =============================================================================

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    /// API key used by key authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    /// Storage URI, e.g. `private://webform/contact/119/cv.pdf`.
    pub uri: String,
    #[serde(default)]
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
}

/// An object loaded by reference id from a submission payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedEntity {
    File(FileObject),
    /// Any object type without a dedicated representation.
    Other { entity_type: String, id: String },
}

impl LinkedEntity {
    /// Object type name of the entity.
    pub fn entity_type(&self) -> &str {
        match self {
            LinkedEntity::File(_) => FILE_OBJECT_TYPE,
            LinkedEntity::Other { entity_type, .. } => entity_type,
        }
    }
}

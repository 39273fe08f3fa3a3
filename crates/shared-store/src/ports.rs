//! # Outbound Ports (Driven Ports)
//!
//! Interfaces the host application implements over its entity storage.

use serde_json::{Map, Value};
use shared_types::{
    FileObject, Form, LinkedEntity, StoreError, Submission, SubmissionHandle, SubmissionId,
    Timestamp, User, UserId,
};
use std::collections::BTreeMap;

/// Filter for [`ObjectStore::query_submissions`].
///
/// Every set field narrows the result; the time bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionQuery {
    pub form_id: Option<String>,
    pub uuid: Option<String>,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}

impl SubmissionQuery {
    /// All submissions of one form.
    pub fn for_form(form_id: impl Into<String>) -> Self {
        Self {
            form_id: Some(form_id.into()),
            ..Self::default()
        }
    }

    /// Submissions carrying the given uuid, across all forms.
    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Self::default()
        }
    }

    pub fn created_from(mut self, from: Option<Timestamp>) -> Self {
        self.created_from = from;
        self
    }

    pub fn created_to(mut self, to: Option<Timestamp>) -> Self {
        self.created_to = to;
        self
    }

    /// Whether a submission passes every set filter.
    pub fn matches(&self, submission: &Submission) -> bool {
        self.form_id.as_deref().map_or(true, |id| submission.form_id == id)
            && self.uuid.as_deref().map_or(true, |uuid| submission.uuid == uuid)
            && self.created_from.map_or(true, |from| submission.created >= from)
            && self.created_to.map_or(true, |to| submission.created <= to)
    }
}

/// Read access to forms, users, submissions and linked objects.
///
/// Production: the host's entity storage.
/// Testing: `InMemoryObjectStore`.
pub trait ObjectStore: Send + Sync {
    /// Load a form by id.
    fn load_form(&self, id: &str) -> Result<Option<Form>, StoreError>;

    /// Load the users with the given ids. Unknown ids are dropped.
    fn load_users(&self, ids: &[UserId]) -> Result<Vec<User>, StoreError>;

    /// Load a submission by internal id.
    fn load_submission(&self, id: SubmissionId) -> Result<Option<Submission>, StoreError>;

    /// Run a filtered query, returning the `(id, uuid)` projection ordered by id.
    fn query_submissions(
        &self,
        query: &SubmissionQuery,
    ) -> Result<Vec<SubmissionHandle>, StoreError>;

    /// Load objects of one type by id. Ids that do not resolve are absent
    /// from the returned map.
    fn load_entities(
        &self,
        entity_type: &str,
        ids: &[String],
    ) -> Result<BTreeMap<String, LinkedEntity>, StoreError>;

    /// Find an uploaded file by its storage URI.
    fn load_file_by_uri(&self, uri: &str) -> Result<Option<FileObject>, StoreError>;
}

/// External write path for submissions.
///
/// Formgate only gates writes; validation and persistence rules belong to the
/// implementation.
pub trait SubmissionWriter: Send + Sync {
    /// Create a submission and return its handle.
    fn create_submission(
        &self,
        form_id: &str,
        data: Map<String, Value>,
        created: Timestamp,
    ) -> Result<SubmissionHandle, StoreError>;

    /// Merge `data` into the payload of the submission with `uuid`.
    ///
    /// Returns `None` when no such submission exists.
    fn patch_submission(
        &self,
        uuid: &str,
        data: Map<String, Value>,
    ) -> Result<Option<Submission>, StoreError>;
}

/// Lookup of users by API key.
pub trait ApiKeyDirectory: Send + Sync {
    fn user_for_api_key(&self, key: &str) -> Result<Option<User>, StoreError>;
}

//! Error types for access resolution.

use shared_types::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The form does not exist, or the submission belongs to another form.
    #[error("Form not found: {form_id}")]
    FormNotFound { form_id: String },

    /// A uuid matched more than one submission.
    #[error("Submission uuid {uuid} matched {matches} submissions")]
    Inconsistent { uuid: String, matches: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AccessError {
    pub fn not_found(form_id: impl Into<String>) -> Self {
        AccessError::FormNotFound {
            form_id: form_id.into(),
        }
    }

    /// Whether callers should treat the error as an absent form.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AccessError::FormNotFound { .. } | AccessError::Inconsistent { .. }
        )
    }
}

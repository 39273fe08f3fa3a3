//! # Outbound Ports (Driven Ports)
//!
//! Collaborators owned by the host's document and file subsystems.

use crate::domain::errors::RenderError;
use shared_types::{ElementDescriptor, FileObject, Form, Submission};

/// Produces the URL of a document generated for one element of a submission.
///
/// Implementations must be deterministic: the same element and submission
/// always yield the same URL.
pub trait DocumentRenderer: Send + Sync {
    fn file_url(
        &self,
        element: &ElementDescriptor,
        submission: &Submission,
    ) -> Result<String, RenderError>;
}

/// An element flagged as producing an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentElement {
    pub key: String,
    /// Declared display name, used when the element has no title.
    pub name: String,
}

/// Lists the attachment-capable elements of a form.
pub trait AttachmentCatalog: Send + Sync {
    fn attachment_elements(&self, form: &Form) -> Vec<AttachmentElement>;
}

/// Maps a stored file to a URL a client can fetch.
pub trait FileUrlResolver: Send + Sync {
    fn file_url(&self, file: &FileObject) -> String;
}

//! URL-only document renderers.
//!
//! Both derive the URL from the element and the submission uuid alone, so
//! generating the same attachment twice yields the same URL.

use crate::domain::attachments::AttachmentKind;
use crate::domain::errors::RenderError;
use crate::ports::outbound::DocumentRenderer;
use shared_types::{ElementDescriptor, Submission};

fn unsupported(element: &ElementDescriptor) -> RenderError {
    RenderError::UnsupportedElement {
        element: element.key.clone(),
        type_tag: element.type_tag.clone(),
    }
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Print output of a submission, e.g. `{base}/print/pdf/{form}/{uuid}/{element}`.
#[derive(Debug, Clone)]
pub struct EntityPrintRenderer {
    base_url: String,
}

impl EntityPrintRenderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl DocumentRenderer for EntityPrintRenderer {
    fn file_url(
        &self,
        element: &ElementDescriptor,
        submission: &Submission,
    ) -> Result<String, RenderError> {
        let Some(AttachmentKind::EntityPrint { kind }) = AttachmentKind::classify(element) else {
            return Err(unsupported(element));
        };
        Ok(format!(
            "{}/print/{}/{}/{}/{}",
            self.base_url,
            encode(&kind),
            encode(&submission.form_id),
            encode(&submission.uuid),
            encode(&element.key)
        ))
    }
}

/// Generated attachment files, e.g.
/// `{base}/forms/{form}/submissions/{uuid}/attachments/{element}.docx`.
#[derive(Debug, Clone)]
pub struct AttachmentRenderer {
    base_url: String,
}

impl AttachmentRenderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl DocumentRenderer for AttachmentRenderer {
    fn file_url(
        &self,
        element: &ElementDescriptor,
        submission: &Submission,
    ) -> Result<String, RenderError> {
        let Some(AttachmentKind::Attachment { kind }) = AttachmentKind::classify(element) else {
            return Err(unsupported(element));
        };
        let mut url = format!(
            "{}/forms/{}/submissions/{}/attachments/{}",
            self.base_url,
            encode(&submission.form_id),
            encode(&submission.uuid),
            encode(&element.key)
        );
        if !kind.is_empty() {
            url.push('.');
            url.push_str(&encode(&kind));
        }
        Ok(url)
    }
}

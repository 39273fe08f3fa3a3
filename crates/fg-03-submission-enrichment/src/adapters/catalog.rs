use crate::domain::attachments::AttachmentKind;
use crate::ports::outbound::{AttachmentCatalog, AttachmentElement};
use shared_types::Form;

/// Flags every element whose type tag denotes an attachment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementTypeAttachmentCatalog;

impl AttachmentCatalog for ElementTypeAttachmentCatalog {
    fn attachment_elements(&self, form: &Form) -> Vec<AttachmentElement> {
        form.elements
            .iter()
            .filter(|element| AttachmentKind::classify(element).is_some())
            .map(|element| AttachmentElement {
                key: element.key.clone(),
                name: element.key.clone(),
            })
            .collect()
    }
}

//! Attachment elements and their output.

use serde::{Deserialize, Serialize};
use shared_types::ElementDescriptor;
use std::collections::BTreeMap;

/// Type tag prefix of print-rendered attachment elements.
pub const ENTITY_PRINT_TYPE_PREFIX: &str = "webform_entity_print_attachment:";

/// Type tag of the generic attachment element.
pub const ATTACHMENT_TYPE: &str = "os2forms_attachment";

/// Which renderer produces an attachment and in what format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Rendered by the print subsystem; kind taken from the type tag.
    EntityPrint { kind: String },
    /// Rendered by the attachment subsystem; kind is the export type.
    Attachment { kind: String },
}

impl AttachmentKind {
    /// Derive the kind from an element's type tag.
    ///
    /// Returns `None` for elements that do not produce attachments.
    pub fn classify(element: &ElementDescriptor) -> Option<Self> {
        if let Some(kind) = element.type_tag.strip_prefix(ENTITY_PRINT_TYPE_PREFIX) {
            if kind.is_empty() {
                return None;
            }
            return Some(AttachmentKind::EntityPrint {
                kind: kind.to_string(),
            });
        }
        if element.type_tag == ATTACHMENT_TYPE {
            return Some(AttachmentKind::Attachment {
                kind: element.export_type.clone().unwrap_or_default(),
            });
        }
        None
    }

    pub fn kind(&self) -> &str {
        match self {
            AttachmentKind::EntityPrint { kind } | AttachmentKind::Attachment { kind } => kind,
        }
    }
}

/// One generated attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// `element key -> attachment`.
pub type AttachmentMap = BTreeMap<String, AttachmentDescriptor>;

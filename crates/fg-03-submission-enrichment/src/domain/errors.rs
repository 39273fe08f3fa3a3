//! Error types for enrichment.

use shared_types::StoreError;
use thiserror::Error;

/// Failure of a document renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The renderer does not handle this element type.
    #[error("Element {element} of type {type_tag} is not supported")]
    UnsupportedElement { element: String, type_tag: String },

    /// The rendering backend could not be reached.
    #[error("Renderer unavailable: {0}")]
    Unavailable(String),
}

/// Failure that aborts enrichment of the whole payload.
///
/// Failures tied to one entry are skipped instead of raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to encode {key}: {reason}")]
    Encode { key: &'static str, reason: String },
}

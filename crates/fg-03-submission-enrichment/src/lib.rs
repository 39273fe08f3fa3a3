//! # Submission Enrichment (fg-03)
//!
//! Augments a submission payload before it is returned:
//!
//! - `linked` - metadata and URLs of files referenced by element values
//! - `attachments` - URLs of documents generated from the submission
//!
//! Both maps are added only when non-empty and never replace an existing key.
//! A single bad reference or failed rendering is logged and skipped.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Reference normalization, attachment kinds, output shapes
//! - `ports/` - Inbound API; renderer, catalog and file URL SPIs
//! - `adapters/` - Default renderers, catalog and file URL resolver
//! - `service/` - `SubmissionEnricher`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    AttachmentRenderer, BaseUrlFileResolver, ElementTypeAttachmentCatalog, EntityPrintRenderer,
};
pub use domain::attachments::{AttachmentDescriptor, AttachmentKind, AttachmentMap};
pub use domain::errors::{EnrichmentError, RenderError};
pub use domain::linked::{reference_ids, LinkedMap, LinkedReference};
pub use ports::inbound::{EnrichmentReport, SubmissionEnrichmentApi};
pub use ports::outbound::{AttachmentCatalog, AttachmentElement, DocumentRenderer, FileUrlResolver};
pub use service::{EnricherDependencies, SubmissionEnricher};

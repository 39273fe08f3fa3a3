//! # Adapters
//!
//! Default implementations of the outbound ports. Each one only derives URLs
//! from its configured base; none of them renders documents.

mod catalog;
mod files;
mod renderers;

pub use catalog::ElementTypeAttachmentCatalog;
pub use files::BaseUrlFileResolver;
pub use renderers::{AttachmentRenderer, EntityPrintRenderer};

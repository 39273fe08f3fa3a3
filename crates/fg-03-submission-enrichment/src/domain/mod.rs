//! # Domain Layer
//!
//! - `linked` - Payload reference ids and linked file output
//! - `attachments` - Attachment element kinds and output
//! - `errors` - Domain error types

pub mod attachments;
pub mod errors;
pub mod linked;

/// Payload key of the linked-object map.
pub const LINKED_KEY: &str = "linked";

/// Payload key of the attachment map.
pub const ATTACHMENTS_KEY: &str = "attachments";

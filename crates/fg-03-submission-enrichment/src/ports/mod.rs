//! # Ports
//!
//! - `inbound` - `SubmissionEnrichmentApi`
//! - `outbound` - Renderers, attachment catalog and file URL resolution

pub mod inbound;
pub mod outbound;

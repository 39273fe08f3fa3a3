//! Cross-subsystem integration scenarios.

pub mod access;
pub mod enrichment;
pub mod fixtures;
pub mod http;
pub mod listing;

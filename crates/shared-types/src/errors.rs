//! # Error Types
//!
//! Errors raised by the object store and shared by every subsystem that reads
//! through it.

use thiserror::Error;

/// Errors that can occur when reading or writing the object store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be decoded.
    #[error("Corrupt record {kind} {id}: {reason}")]
    Corrupt {
        kind: &'static str,
        id: String,
        reason: String,
    },

    /// A write referenced a form that does not exist.
    #[error("Unknown form: {0}")]
    UnknownForm(String),

    /// A write was rejected by the store.
    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

impl StoreError {
    /// Whether the error came from the store being unreachable rather than
    /// from the request itself.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

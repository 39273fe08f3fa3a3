//! Error types for submission queries.

use shared_types::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A caller-supplied parameter could not be parsed.
    #[error("Invalid {name}: could not generate DateTime from {value}")]
    InvalidParameter { name: String, value: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

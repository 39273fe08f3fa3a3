//! # Domain Layer
//!
//! Pure access-control logic. Nothing here touches the store.
//!
//! - `policy` - Policy chain and built-in policies
//! - `download` - Storage path parsing for the download gate
//! - `errors` - Domain error types

pub mod download;
pub mod errors;
pub mod policy;

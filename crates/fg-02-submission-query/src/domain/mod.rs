//! # Domain Layer
//!
//! - `window` - Inclusive creation-time window
//! - `params` - Boundary parsing of caller-supplied dates
//! - `listing` - Response body and submission URLs
//! - `errors` - Domain error types

pub mod errors;
pub mod listing;
pub mod params;
pub mod window;

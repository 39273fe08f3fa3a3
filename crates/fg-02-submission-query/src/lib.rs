//! # Submission Query (fg-02)
//!
//! Lists the submissions of a form inside an optional creation-time window.
//!
//! Listings only carry `(id, uuid)` projections and expose the uuid. Internal
//! numeric ids never leave this crate's callers.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Time window, parameter parsing, listing body, errors
//! - `ports/` - Inbound API
//! - `service/` - `SubmissionQueryService`

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::QueryError;
pub use domain::listing::{SubmissionListing, SubmissionUrlBuilder};
pub use domain::params::parse_time_param;
pub use domain::window::TimeWindow;
pub use ports::inbound::SubmissionQueryApi;
pub use service::SubmissionQueryService;

//! # Shared Types Crate
//!
//! This crate contains the domain entities every Formgate subsystem works on:
//! forms and their element descriptors, submissions, users, uploaded files
//! and the per-request caller identity.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Classify Once**: Element descriptors are classified (direct reference,
//!   legacy file upload, plain) when a form is built, never per request.
//! - **Read-Only Forms**: A loaded `Form` is an immutable value shared by
//!   reference; no subsystem mutates it.

pub mod entities;
pub mod errors;
pub mod identity;

pub use entities::*;
pub use errors::*;
pub use identity::*;

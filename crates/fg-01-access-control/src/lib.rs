//! # Access Control (fg-01)
//!
//! Decides, for a (form, optional submission, caller) triple, which form a
//! request targets and whether the caller may access it.
//!
//! ## Domain Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | Resolve first | The target form is resolved the same way whether the caller named a form or a submission |
//! | Uniform not-found | A submission owned by another form looks exactly like a missing form |
//! | Deny by default | Access needs at least one policy to return `Allow` |
//! | Veto only | The download gate can deny a download but never grant one |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Policies, download path parsing, errors
//! - `ports/` - Inbound API and the capability evaluator SPI
//! - `service.rs` - `AccessControlService` implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! let service = AccessControlService::new(store, capabilities, AccessPolicyConfig::default());
//! let form = service.resolve_form("contact", Some(uuid))?;
//! if !service.is_allowed(&form, &identity)? {
//!     // reject
//! }
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::download::download_form_id;
pub use domain::errors::AccessError;
pub use domain::policy::{
    AccessPolicy, AccessPolicyConfig, AllowListPolicy, PolicyContext, PolicyVerdict,
    ViewAnyPolicy, VIEW_ANY_CAPABILITY,
};
pub use ports::inbound::AccessControlApi;
pub use ports::outbound::{CapabilityEvaluator, StaticCapabilityEvaluator};
pub use service::AccessControlService;

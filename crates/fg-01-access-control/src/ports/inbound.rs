//! # Inbound Ports (Driving Ports)
//!
//! The API the gateway calls before any handler runs.

use crate::domain::errors::AccessError;
use crate::domain::policy::PolicyVerdict;
use shared_types::{Form, Identity};

/// Primary API for the Access Control subsystem.
pub trait AccessControlApi: Send + Sync {
    /// Resolve the form a request targets.
    ///
    /// With a submission uuid the form is resolved through the submission and
    /// must equal `form_id`.
    ///
    /// ## Errors
    ///
    /// - `FormNotFound`: no such form, no such submission, or the submission
    ///   belongs to another form
    /// - `Inconsistent`: the uuid matched more than one submission
    /// - `Storage`: the store failed
    fn resolve_form(&self, form_id: &str, submission_uuid: Option<&str>)
        -> Result<Form, AccessError>;

    /// Whether `identity` may access `form`.
    fn is_allowed(&self, form: &Form, identity: &Identity) -> Result<bool, AccessError>;

    /// Veto check for a file download. Never returns `Allow`.
    fn check_download(&self, path: &str, identity: &Identity)
        -> Result<PolicyVerdict, AccessError>;
}

//! # Inbound Ports (Driving Ports)

use crate::domain::errors::QueryError;
use crate::domain::window::TimeWindow;
use shared_types::{Form, SubmissionHandle};

/// Primary API for the Submission Query subsystem.
pub trait SubmissionQueryApi: Send + Sync {
    /// Submissions of `form` created inside `window`, ordered by id.
    ///
    /// Takes already-validated timestamps; see `parse_time_param` for the
    /// caller-facing parsing.
    fn list_submissions(
        &self,
        form: &Form,
        window: TimeWindow,
    ) -> Result<Vec<SubmissionHandle>, QueryError>;
}

//! # Inbound Ports (Driving Ports)

use crate::domain::attachments::AttachmentMap;
use crate::domain::errors::EnrichmentError;
use crate::domain::linked::LinkedMap;
use serde_json::{Map, Value};
use shared_types::{Form, Submission};

/// Counts gathered while enriching one payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub linked_entries: usize,
    pub attachment_entries: usize,
    /// Entries dropped because of a recoverable failure.
    pub skipped: usize,
}

/// Primary API for the Submission Enrichment subsystem.
pub trait SubmissionEnrichmentApi: Send + Sync {
    /// Return a copy of `payload` with `linked` and `attachments` added.
    ///
    /// Each map is added only when non-empty and only when `payload` has no
    /// entry of that name.
    fn enrich(
        &self,
        form: &Form,
        submission: &Submission,
        payload: &Map<String, Value>,
    ) -> Result<Map<String, Value>, EnrichmentError> {
        self.enrich_with_report(form, submission, payload)
            .map(|(enriched, _)| enriched)
    }

    /// Same as [`enrich`](Self::enrich), also returning entry counts.
    fn enrich_with_report(
        &self,
        form: &Form,
        submission: &Submission,
        payload: &Map<String, Value>,
    ) -> Result<(Map<String, Value>, EnrichmentReport), EnrichmentError>;

    /// Resolve file references held by the payload's elements.
    fn build_linked(
        &self,
        form: &Form,
        payload: &Map<String, Value>,
    ) -> Result<LinkedMap, EnrichmentError>;

    /// Produce URLs for the form's attachment elements.
    fn build_attachments(
        &self,
        form: &Form,
        submission: &Submission,
    ) -> Result<AttachmentMap, EnrichmentError>;
}

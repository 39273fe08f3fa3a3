//! # Submission Query Service


use crate::domain::errors::QueryError;
use crate::domain::window::TimeWindow;
use crate::ports::inbound::SubmissionQueryApi;
use shared_store::{ObjectStore, SubmissionQuery};
use shared_types::{Form, SubmissionHandle};
use std::sync::Arc;
use tracing::debug;

pub struct SubmissionQueryService {
    store: Arc<dyn ObjectStore>,
}

impl SubmissionQueryService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

impl SubmissionQueryApi for SubmissionQueryService {
    fn list_submissions(
        &self,
        form: &Form,
        window: TimeWindow,
    ) -> Result<Vec<SubmissionHandle>, QueryError> {
        if window.is_empty() {
            debug!(form_id = %form.id, ?window, "Inverted window, skipping query");
            return Ok(Vec::new());
        }

        let query = SubmissionQuery::for_form(form.id.clone())
            .created_from(window.start)
            .created_to(window.end);
        let handles = self.store.query_submissions(&query)?;

        debug!(form_id = %form.id, count = handles.len(), "Listed submissions");
        Ok(handles)
    }
}

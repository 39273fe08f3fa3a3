//! # Submission Enricher
//!
//! Implements `SubmissionEnrichmentApi`.
//!
//! Store and renderer outages abort enrichment. Anything narrower, such as an
//! unreadable entity table, an unhandled object type or an element a renderer
//! rejects, drops that entry with a warning.


use crate::adapters::{
    AttachmentRenderer, BaseUrlFileResolver, ElementTypeAttachmentCatalog, EntityPrintRenderer,
};
use crate::domain::attachments::{AttachmentDescriptor, AttachmentKind, AttachmentMap};
use crate::domain::errors::{EnrichmentError, RenderError};
use crate::domain::linked::{reference_ids, LinkedMap, LinkedReference};
use crate::domain::{ATTACHMENTS_KEY, LINKED_KEY};
use crate::ports::inbound::{EnrichmentReport, SubmissionEnrichmentApi};
use crate::ports::outbound::{AttachmentCatalog, DocumentRenderer, FileUrlResolver};
use serde::Serialize;
use serde_json::{Map, Value};
use shared_store::ObjectStore;
use shared_types::{Form, LinkedEntity, Submission};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Collaborators of the enricher.
#[derive(Clone)]
pub struct EnricherDependencies {
    pub store: Arc<dyn ObjectStore>,
    pub files: Arc<dyn FileUrlResolver>,
    pub catalog: Arc<dyn AttachmentCatalog>,
    /// Renders `webform_entity_print_attachment:<kind>` elements.
    pub entity_print: Arc<dyn DocumentRenderer>,
    /// Renders `os2forms_attachment` elements.
    pub attachments: Arc<dyn DocumentRenderer>,
}

impl EnricherDependencies {
    /// Default adapters, all rooted at `base_url`.
    pub fn with_base_url(store: Arc<dyn ObjectStore>, base_url: &str) -> Self {
        Self {
            store,
            files: Arc::new(BaseUrlFileResolver::new(base_url)),
            catalog: Arc::new(ElementTypeAttachmentCatalog),
            entity_print: Arc::new(EntityPrintRenderer::new(base_url)),
            attachments: Arc::new(AttachmentRenderer::new(base_url)),
        }
    }
}

/// The Submission Enricher.
pub struct SubmissionEnricher {
    deps: EnricherDependencies,
}

impl SubmissionEnricher {
    pub fn new(deps: EnricherDependencies) -> Self {
        Self { deps }
    }

    fn collect_linked(
        &self,
        form: &Form,
        payload: &Map<String, Value>,
        report: &mut EnrichmentReport,
    ) -> Result<LinkedMap, EnrichmentError> {
        let mut linked = LinkedMap::new();

        for element in &form.elements {
            let Some(value) = payload.get(&element.key) else {
                continue;
            };
            let Some(object_type) = element.reference().object_type() else {
                continue;
            };
            let ids = reference_ids(value);
            if ids.is_empty() {
                continue;
            }

            let entities = match self.deps.store.load_entities(object_type, &ids) {
                Ok(entities) => entities,
                Err(err) if err.is_unavailable() => return Err(err.into()),
                Err(err) => {
                    warn!(element = %element.key, object_type, error = %err, "Skipping linked element");
                    report.skipped += 1;
                    continue;
                }
            };

            let mut references = BTreeMap::new();
            for id in &ids {
                match entities.get(id) {
                    Some(LinkedEntity::File(file)) => {
                        references.insert(
                            id.clone(),
                            LinkedReference {
                                id: file.id.clone(),
                                url: self.deps.files.file_url(file),
                                mime_type: file.mime_type.clone(),
                                size: file.size,
                            },
                        );
                    }
                    Some(other) => {
                        warn!(
                            element = %element.key,
                            entity_type = other.entity_type(),
                            id = %id,
                            "unhandled linked entity type"
                        );
                        report.skipped += 1;
                    }
                    None => debug!(element = %element.key, id = %id, "Dangling reference"),
                }
            }

            if !references.is_empty() {
                report.linked_entries += references.len();
                linked.insert(element.key.clone(), references);
            }
        }

        Ok(linked)
    }

    fn collect_attachments(
        &self,
        form: &Form,
        submission: &Submission,
        report: &mut EnrichmentReport,
    ) -> Result<AttachmentMap, EnrichmentError> {
        let mut attachments = AttachmentMap::new();

        for entry in self.deps.catalog.attachment_elements(form) {
            let Some(element) = form.element(&entry.key) else {
                continue;
            };
            let Some(kind) = AttachmentKind::classify(element) else {
                continue;
            };
            let renderer = match kind {
                AttachmentKind::EntityPrint { .. } => &self.deps.entity_print,
                AttachmentKind::Attachment { .. } => &self.deps.attachments,
            };

            match renderer.file_url(element, submission) {
                Ok(url) => {
                    attachments.insert(
                        entry.key.clone(),
                        AttachmentDescriptor {
                            name: element.title.clone().unwrap_or(entry.name),
                            kind: kind.kind().to_string(),
                            url,
                        },
                    );
                }
                Err(err @ RenderError::Unavailable(_)) => return Err(err.into()),
                Err(err) => {
                    warn!(element = %entry.key, error = %err, "Skipping attachment");
                    report.skipped += 1;
                }
            }
        }

        report.attachment_entries = attachments.len();
        Ok(attachments)
    }
}

fn insert_absent<T: Serialize>(
    payload: &mut Map<String, Value>,
    key: &'static str,
    value: &T,
) -> Result<(), EnrichmentError> {
    if payload.contains_key(key) {
        debug!(key, "Payload already has key, not enriching");
        return Ok(());
    }
    let value = serde_json::to_value(value).map_err(|err| EnrichmentError::Encode {
        key,
        reason: err.to_string(),
    })?;
    payload.insert(key.to_string(), value);
    Ok(())
}

impl SubmissionEnrichmentApi for SubmissionEnricher {
    fn enrich_with_report(
        &self,
        form: &Form,
        submission: &Submission,
        payload: &Map<String, Value>,
    ) -> Result<(Map<String, Value>, EnrichmentReport), EnrichmentError> {
        let mut report = EnrichmentReport::default();
        let linked = self.collect_linked(form, payload, &mut report)?;
        let attachments = self.collect_attachments(form, submission, &mut report)?;

        let mut enriched = payload.clone();
        if !linked.is_empty() {
            insert_absent(&mut enriched, LINKED_KEY, &linked)?;
        }
        if !attachments.is_empty() {
            insert_absent(&mut enriched, ATTACHMENTS_KEY, &attachments)?;
        }

        debug!(
            form_id = %form.id,
            uuid = %submission.uuid,
            linked = report.linked_entries,
            attachments = report.attachment_entries,
            skipped = report.skipped,
            "Enriched submission"
        );
        Ok((enriched, report))
    }

    fn build_linked(
        &self,
        form: &Form,
        payload: &Map<String, Value>,
    ) -> Result<LinkedMap, EnrichmentError> {
        self.collect_linked(form, payload, &mut EnrichmentReport::default())
    }

    fn build_attachments(
        &self,
        form: &Form,
        submission: &Submission,
    ) -> Result<AttachmentMap, EnrichmentError> {
        self.collect_attachments(form, submission, &mut EnrichmentReport::default())
    }
}

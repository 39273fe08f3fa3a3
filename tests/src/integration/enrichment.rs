//! # Enrichment Scenarios
//!
//! Shapes of the `linked` and `attachments` maps produced by fg-03 for
//! submissions held in the shared store.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{contact_form, file, scenario_store, submission, BASE_URL};
    use fg_03_submission_enrichment::{
        reference_ids, AttachmentRenderer, DocumentRenderer, EnricherDependencies,
        EntityPrintRenderer, SubmissionEnricher, SubmissionEnrichmentApi,
    };
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use shared_store::InMemoryObjectStore;
    use shared_types::{ElementDescriptor, Form};
    use std::sync::Arc;

    fn enricher(store: Arc<InMemoryObjectStore>) -> SubmissionEnricher {
        SubmissionEnricher::new(EnricherDependencies::with_base_url(store, BASE_URL))
    }

    fn enrich(form: &Form, data: Value) -> serde_json::Map<String, Value> {
        let sub = submission(1, "uuid-jan", &form.id, 0, data);
        enricher(scenario_store())
            .enrich(form, &sub, &sub.data)
            .unwrap()
    }

    // =========================================================================
    // linked
    // =========================================================================

    #[test]
    fn test_single_scalar_reference_has_exactly_four_fields() {
        let enriched = enrich(&contact_form(), json!({"upload": "127"}));

        let entry = enriched["linked"]["upload"]["127"].as_object().unwrap();
        assert_eq!(entry.len(), 4);
        assert_eq!(entry["id"], "127");
        assert_eq!(
            entry["url"],
            "http://forms.test/files/private/webform/contact/1/cv.pdf"
        );
        assert_eq!(entry["mimeType"], "application/pdf");
        assert_eq!(entry["size"], 2048);
    }

    #[test]
    fn test_multi_value_keeps_every_id() {
        let enriched = enrich(&contact_form(), json!({"gallery": ["128", "129"]}));

        let gallery = enriched["linked"]["gallery"].as_object().unwrap();
        let keys: Vec<_> = gallery.keys().cloned().collect();
        assert_eq!(keys, vec!["128", "129"]);
    }

    #[test]
    fn test_no_reference_elements_omits_linked() {
        let form = Form::new("open", "Open")
            .with_element(ElementDescriptor::new("comment", "textarea"));
        let enriched = enrich(&form, json!({"comment": "127"}));
        assert!(!enriched.contains_key("linked"));
        assert!(!enriched.contains_key("attachments"));
    }

    #[test]
    fn test_numeric_reference_ids() {
        let enriched = enrich(&contact_form(), json!({"upload": 127}));
        assert_eq!(enriched["linked"]["upload"]["127"]["id"], "127");
    }

    #[test]
    fn test_file_added_later_is_picked_up() {
        let store = scenario_store();
        let sub = submission(9, "uuid-late", "contact", 0, json!({"upload": ["127", "130"]}));
        let before = enricher(Arc::clone(&store))
            .build_linked(&contact_form(), &sub.data)
            .unwrap();
        assert_eq!(before["upload"].len(), 1);

        store.insert_file(file("130", "late.pdf"));
        let after = enricher(store)
            .build_linked(&contact_form(), &sub.data)
            .unwrap();
        assert_eq!(after["upload"].len(), 2);
    }

    // =========================================================================
    // attachments
    // =========================================================================

    #[test]
    fn test_print_attachment_entry() {
        let enriched = enrich(&contact_form(), json!({"name": "Ada"}));
        assert_eq!(
            enriched["attachments"],
            json!({
                "receipt": {
                    "name": "Receipt",
                    "type": "pdf",
                    "url": "http://forms.test/print/pdf/contact/uuid-jan/receipt"
                }
            })
        );
    }

    proptest! {
        #[test]
        fn prop_scalar_and_singleton_list_are_equivalent(id in "[0-9]{1,6}") {
            prop_assert_eq!(
                reference_ids(&Value::String(id.clone())),
                reference_ids(&json!([id]))
            );
        }

        #[test]
        fn prop_attachment_url_round_trip(
            key in "[a-z][a-z_]{0,10}",
            uuid in "[a-f0-9]{8}",
            kind in "(pdf|html|docx)",
        ) {
            let print_key = format!("{key}_print");
            let form = Form::new("contact", "Contact")
                .with_element(ElementDescriptor::new(key.clone(), "os2forms_attachment").with_export_type(kind.clone()))
                .with_element(ElementDescriptor::new(print_key.clone(), format!("webform_entity_print_attachment:{kind}")));
            let sub = submission(1, &uuid, "contact", 0, json!({}));

            let attachments = enricher(scenario_store()).build_attachments(&form, &sub).unwrap();

            let direct = AttachmentRenderer::new(BASE_URL)
                .file_url(form.element(&key).unwrap(), &sub)
                .unwrap();
            prop_assert_eq!(&attachments[&key].url, &direct);
            prop_assert_eq!(&attachments[&key].kind, &kind);

            let printed = EntityPrintRenderer::new(BASE_URL)
                .file_url(form.element(&print_key).unwrap(), &sub)
                .unwrap();
            prop_assert_eq!(&attachments[&print_key].url, &printed);
        }
    }
}

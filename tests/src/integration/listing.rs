//! # Listing Scenarios
//!
//! fg-02 time-window listings over the shared store, and the listing body the
//! gateway renders from them.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{contact_form, scenario_store, BASE_URL, FEB_1, JAN_1};
    use fg_02_submission_query::{
        parse_time_param, QueryError, SubmissionListing, SubmissionQueryApi,
        SubmissionQueryService, SubmissionUrlBuilder, TimeWindow,
    };
    use proptest::prelude::*;
    use serde_json::json;

    fn uuids(window: TimeWindow) -> Vec<String> {
        SubmissionQueryService::new(scenario_store())
            .list_submissions(&contact_form(), window)
            .unwrap()
            .into_iter()
            .map(|handle| handle.uuid)
            .collect()
    }

    #[test]
    fn test_unbounded_lists_only_own_form_in_id_order() {
        assert_eq!(uuids(TimeWindow::unbounded()), vec!["uuid-jan", "uuid-feb"]);
    }

    #[test]
    fn test_window_from_parsed_parameters() {
        let start = parse_time_param("starttime", "2024-01-15").unwrap();
        let end = parse_time_param("endtime", "2024-03-01T00:00:00Z").unwrap();
        assert_eq!(uuids(TimeWindow::new(start, end)), vec!["uuid-feb"]);

        let end = parse_time_param("endtime", "2024-01-31").unwrap();
        assert_eq!(uuids(TimeWindow::new(None, end)), vec!["uuid-jan"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let created = JAN_1 + 12 * 3600;
        assert_eq!(
            uuids(TimeWindow::new(Some(created), Some(created))),
            vec!["uuid-jan"]
        );
    }

    #[test]
    fn test_invalid_parameter_names_itself() {
        let err = parse_time_param("endtime", "not-a-date").unwrap_err();
        assert!(matches!(err, QueryError::InvalidParameter { ref name, .. } if name == "endtime"));
    }

    #[test]
    fn test_listing_body() {
        let handles = SubmissionQueryService::new(scenario_store())
            .list_submissions(&contact_form(), TimeWindow::unbounded())
            .unwrap();
        let listing = SubmissionListing::new("contact")
            .with_filters(Some("2024-01-01"), None)
            .with_handles(&handles, &SubmissionUrlBuilder::new(BASE_URL));

        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!({
                "webform_id": "contact",
                "starttime": "2024-01-01",
                "submissions": {
                    "uuid-jan": "http://forms.test/forms/contact/submissions/uuid-jan",
                    "uuid-feb": "http://forms.test/forms/contact/submissions/uuid-feb"
                }
            })
        );
    }

    proptest! {
        #[test]
        fn prop_inverted_window_is_empty(
            start in JAN_1..FEB_1 * 2,
            gap in 1i64..10_000_000,
        ) {
            let window = TimeWindow::new(Some(start), Some(start - gap));
            prop_assert!(window.is_empty());
            prop_assert!(uuids(window).is_empty());
        }
    }
}

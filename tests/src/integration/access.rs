//! # Access Scenarios
//!
//! The policy chain and form resolution of fg-01 running against the shared
//! in-memory store, including allow-list ids that point at deleted users.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{contact_form, scenario_store};
    use fg_01_access_control::{
        AccessControlApi, AccessControlService, AccessError, AccessPolicyConfig, PolicyVerdict,
        StaticCapabilityEvaluator, VIEW_ANY_CAPABILITY,
    };
    use proptest::prelude::*;
    use shared_store::InMemoryObjectStore;
    use shared_types::{Form, Identity};
    use std::sync::Arc;

    fn service(
        store: Arc<InMemoryObjectStore>,
        evaluator: StaticCapabilityEvaluator,
        config: AccessPolicyConfig,
    ) -> AccessControlService {
        AccessControlService::new(store, Arc::new(evaluator), config)
    }

    fn default_service() -> AccessControlService {
        service(
            scenario_store(),
            StaticCapabilityEvaluator::new(),
            AccessPolicyConfig::default(),
        )
    }

    // =========================================================================
    // is_allowed
    // =========================================================================

    #[test]
    fn test_listed_caller_is_allowed() {
        let access = default_service();
        assert!(access
            .is_allowed(&contact_form(), &Identity::api_key(42))
            .unwrap());
        assert!(!access
            .is_allowed(&contact_form(), &Identity::api_key(7))
            .unwrap());
    }

    #[test]
    fn test_anonymous_denied_on_empty_allow_list_without_view_any() {
        let access = default_service();
        let open = Form::new("open", "Open");
        assert!(!access.is_allowed(&open, &Identity::anonymous()).unwrap());
    }

    #[test]
    fn test_empty_allow_list_can_be_configured_open() {
        let access = service(
            scenario_store(),
            StaticCapabilityEvaluator::new(),
            AccessPolicyConfig {
                open_when_allow_list_empty: true,
            },
        );
        let open = Form::new("open", "Open");
        assert!(access.is_allowed(&open, &Identity::anonymous()).unwrap());
        assert!(access.is_allowed(&open, &Identity::api_key(7)).unwrap());
    }

    #[test]
    fn test_view_any_grants_unlisted_caller() {
        let access = service(
            scenario_store(),
            StaticCapabilityEvaluator::new().grant(VIEW_ANY_CAPABILITY, 7),
            AccessPolicyConfig::default(),
        );
        assert!(access
            .is_allowed(&contact_form(), &Identity::api_key(7))
            .unwrap());
    }

    #[test]
    fn test_allow_list_of_deleted_users_behaves_as_empty() {
        // 900 and 901 do not exist in the store
        let form = Form::new("ghosts", "Ghosts").with_allowed_users([900, 901]);

        let closed = default_service();
        assert!(!closed.is_allowed(&form, &Identity::api_key(900)).unwrap());

        let open = service(
            scenario_store(),
            StaticCapabilityEvaluator::new(),
            AccessPolicyConfig {
                open_when_allow_list_empty: true,
            },
        );
        assert!(open.is_allowed(&form, &Identity::api_key(7)).unwrap());
    }

    #[test]
    fn test_store_outage_surfaces_as_storage_error() {
        let store = scenario_store();
        store.set_offline(true);
        let access = service(
            store,
            StaticCapabilityEvaluator::new(),
            AccessPolicyConfig::default(),
        );
        assert!(matches!(
            access.is_allowed(&contact_form(), &Identity::api_key(42)),
            Err(AccessError::Storage(_))
        ));
    }

    // =========================================================================
    // resolve_form
    // =========================================================================

    #[test]
    fn test_resolve_form_with_own_submission() {
        let access = default_service();
        let form = access.resolve_form("contact", Some("uuid-jan")).unwrap();
        assert_eq!(form.id, "contact");
    }

    #[test]
    fn test_resolve_form_rejects_uuid_of_other_form() {
        let access = default_service();
        let err = access
            .resolve_form("contact", Some("uuid-survey"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resolve_unknown_form_and_uuid() {
        let access = default_service();
        assert!(access.resolve_form("missing", None).unwrap_err().is_not_found());
        assert!(access
            .resolve_form("contact", Some("no-such-uuid"))
            .unwrap_err()
            .is_not_found());
    }

    // =========================================================================
    // check_download
    // =========================================================================

    #[test]
    fn test_download_gate_follows_form_policy() {
        let access = default_service();
        let path = "private://webform/contact/1/cv.pdf";

        assert_eq!(
            access.check_download(path, &Identity::api_key(42)).unwrap(),
            PolicyVerdict::Abstain
        );
        assert_eq!(
            access.check_download(path, &Identity::api_key(7)).unwrap(),
            PolicyVerdict::Deny
        );
        assert_eq!(
            access
                .check_download("public://logo.png", &Identity::api_key(7))
                .unwrap(),
            PolicyVerdict::Abstain
        );
        // Only API key callers are vetoed
        assert_eq!(
            access.check_download(path, &Identity::session(7)).unwrap(),
            PolicyVerdict::Abstain
        );
    }

    proptest! {
        #[test]
        fn prop_listed_caller_allowed_regardless_of_view_any(
            caller in 1u64..50,
            others in proptest::collection::vec(1u64..50, 0..5),
            view_any in any::<bool>(),
        ) {
            let store = Arc::new(InMemoryObjectStore::new());
            for id in others.iter().chain(std::iter::once(&caller)) {
                store.insert_user(shared_types::User {
                    id: *id,
                    name: format!("user-{id}"),
                    api_key: None,
                });
            }
            let mut evaluator = StaticCapabilityEvaluator::new();
            if view_any {
                evaluator = evaluator.grant(VIEW_ANY_CAPABILITY, caller);
            }
            let access = service(store, evaluator, AccessPolicyConfig::default());

            let mut allowed = others.clone();
            allowed.push(caller);
            let form = Form::new("f", "F").with_allowed_users(allowed);
            prop_assert!(access.is_allowed(&form, &Identity::api_key(caller)).unwrap());
        }

        #[test]
        fn prop_anonymous_denied_without_view_any(
            listed in proptest::collection::vec(1u64..50, 0..5),
        ) {
            let access = service(
                scenario_store(),
                StaticCapabilityEvaluator::new(),
                AccessPolicyConfig::default(),
            );
            let form = Form::new("f", "F").with_allowed_users(listed);
            prop_assert!(!access.is_allowed(&form, &Identity::anonymous()).unwrap());
        }
    }
}

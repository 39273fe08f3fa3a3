//! # Access Control Service
//!
//! Implements `AccessControlApi` over an `ObjectStore`.
//!
//! ## Architecture
//!
//! 1. `resolve_form` finds the target form, directly or through a submission
//! 2. `is_allowed` resolves the allow-list and runs the policy chain
//! 3. `check_download` maps a storage path to a form and vetoes on denial


use crate::domain::download::download_form_id;
use crate::domain::errors::AccessError;
use crate::domain::policy::{
    reduce_chain, AccessPolicy, AccessPolicyConfig, AllowListPolicy, PolicyContext,
    PolicyVerdict, ViewAnyPolicy,
};
use crate::ports::inbound::AccessControlApi;
use crate::ports::outbound::CapabilityEvaluator;
use shared_store::{ObjectStore, SubmissionQuery};
use shared_types::{AuthScheme, Form, Identity, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error};

/// The Access Control Service.
pub struct AccessControlService {
    store: Arc<dyn ObjectStore>,
    policies: Vec<Box<dyn AccessPolicy>>,
}

impl AccessControlService {
    /// Build the service with the default chain: allow-list, then view-any.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        capabilities: Arc<dyn CapabilityEvaluator>,
        config: AccessPolicyConfig,
    ) -> Self {
        let policies: Vec<Box<dyn AccessPolicy>> = vec![
            Box::new(AllowListPolicy::new(&config)),
            Box::new(ViewAnyPolicy::new(capabilities)),
        ];
        Self::with_policies(store, policies)
    }

    /// Build the service with a custom policy chain.
    pub fn with_policies(store: Arc<dyn ObjectStore>, policies: Vec<Box<dyn AccessPolicy>>) -> Self {
        Self { store, policies }
    }

    /// Distinct allow-listed ids that resolve to existing users.
    fn allow_list(&self, form: &Form) -> Result<Vec<UserId>, AccessError> {
        let requested: BTreeSet<UserId> = form.allowed_users.iter().copied().collect();
        if requested.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<UserId> = requested.into_iter().collect();
        let existing: BTreeSet<UserId> = self
            .store
            .load_users(&ids)?
            .into_iter()
            .map(|user| user.id)
            .collect();
        Ok(existing.into_iter().collect())
    }
}

impl AccessControlApi for AccessControlService {
    fn resolve_form(
        &self,
        form_id: &str,
        submission_uuid: Option<&str>,
    ) -> Result<Form, AccessError> {
        let Some(uuid) = submission_uuid else {
            return self
                .store
                .load_form(form_id)?
                .ok_or_else(|| AccessError::not_found(form_id));
        };

        let handles = self.store.query_submissions(&SubmissionQuery::by_uuid(uuid))?;
        let handle = match handles.as_slice() {
            [] => return Err(AccessError::not_found(form_id)),
            [handle] => handle,
            _ => {
                error!(
                    form_id,
                    uuid,
                    matches = handles.len(),
                    "Submission uuid is not unique"
                );
                return Err(AccessError::Inconsistent {
                    uuid: uuid.to_string(),
                    matches: handles.len(),
                });
            }
        };

        let submission = self
            .store
            .load_submission(handle.id)?
            .ok_or_else(|| AccessError::not_found(form_id))?;
        if submission.form_id != form_id {
            // Same signal as a missing form so uuids of other forms stay hidden
            return Err(AccessError::not_found(form_id));
        }

        self.store
            .load_form(&submission.form_id)?
            .ok_or_else(|| AccessError::not_found(form_id))
    }

    fn is_allowed(&self, form: &Form, identity: &Identity) -> Result<bool, AccessError> {
        let allow_list = self.allow_list(form)?;
        let ctx = PolicyContext {
            form,
            identity,
            allow_list: &allow_list,
        };
        let (verdict, granted_by) = reduce_chain(&self.policies, &ctx);

        debug!(
            form_id = %form.id,
            user_id = identity.id,
            verdict = %verdict,
            granted_by = granted_by.unwrap_or("-"),
            "Access decision"
        );
        Ok(verdict == PolicyVerdict::Allow)
    }

    fn check_download(
        &self,
        path: &str,
        identity: &Identity,
    ) -> Result<PolicyVerdict, AccessError> {
        let Some(form_id) = download_form_id(path) else {
            return Ok(PolicyVerdict::Abstain);
        };
        if identity.scheme != AuthScheme::ApiKey {
            return Ok(PolicyVerdict::Abstain);
        }

        let form = match self.resolve_form(form_id, None) {
            Ok(form) => form,
            Err(err) if err.is_not_found() => return Ok(PolicyVerdict::Abstain),
            Err(err) => return Err(err),
        };

        let verdict = if self.is_allowed(&form, identity)? {
            PolicyVerdict::Abstain
        } else {
            PolicyVerdict::Deny
        };
        debug!(path, form_id, user_id = identity.id, verdict = %verdict, "Download check");
        Ok(verdict)
    }
}

//! # Outbound Ports (Driven Ports)
//!
//! Capability evaluation is owned by the host's permission system.

use shared_types::{Form, Identity, UserId};
use std::collections::{HashMap, HashSet};

/// Evaluates a named capability of a form for a caller.
pub trait CapabilityEvaluator: Send + Sync {
    fn evaluate(&self, form: &Form, identity: &Identity, capability: &str) -> bool;
}

// =============================================================================
// ADAPTER IMPLEMENTATIONS
// =============================================================================

/// Capability grants from configuration, identical for every form.
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilityEvaluator {
    users: HashMap<String, HashSet<UserId>>,
    anonymous: HashSet<String>,
}

impl StaticCapabilityEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `capability` to an authenticated user.
    pub fn grant(mut self, capability: impl Into<String>, user: UserId) -> Self {
        self.users.entry(capability.into()).or_default().insert(user);
        self
    }

    /// Grant `capability` to every anonymous caller.
    pub fn grant_anonymous(mut self, capability: impl Into<String>) -> Self {
        self.anonymous.insert(capability.into());
        self
    }
}

impl CapabilityEvaluator for StaticCapabilityEvaluator {
    fn evaluate(&self, _form: &Form, identity: &Identity, capability: &str) -> bool {
        if identity.is_anonymous() {
            return self.anonymous.contains(capability);
        }
        self.users
            .get(capability)
            .is_some_and(|users| users.contains(&identity.id))
    }
}

//! # Access Policy Chain
//!
//! An access decision is the reduction of an ordered list of policies. Each
//! policy votes `Allow`, `Deny` or `Abstain`; any `Allow` grants access and
//! everything else, including an empty chain, denies.
//!
//! `Deny` from a policy is recorded but does not override an `Allow` from
//! another policy. The download gate reuses `PolicyVerdict` to express its
//! veto.

use crate::ports::outbound::CapabilityEvaluator;
use serde::{Deserialize, Serialize};
use shared_types::{Form, Identity, UserId};
use std::fmt;
use std::sync::Arc;

/// Capability that grants read access to every submission of a form.
pub const VIEW_ANY_CAPABILITY: &str = "view_any";

/// A single policy's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyVerdict {
    Allow,
    Deny,
    Abstain,
}

impl fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PolicyVerdict::Allow => "allow",
            PolicyVerdict::Deny => "deny",
            PolicyVerdict::Abstain => "abstain",
        };
        f.write_str(s)
    }
}

/// Inputs available to every policy.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub form: &'a Form,
    pub identity: &'a Identity,
    /// Distinct ids from the form's allow-list that resolve to existing users.
    pub allow_list: &'a [UserId],
}

/// One link of the policy chain.
pub trait AccessPolicy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &PolicyContext<'_>) -> PolicyVerdict;
}

/// Tunables for the built-in policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPolicyConfig {
    /// Treat a form without any resolvable allow-listed user as open to
    /// everyone.
    pub open_when_allow_list_empty: bool,
}

/// Allows callers whose id is on the form's allow-list.
#[derive(Debug, Clone, Default)]
pub struct AllowListPolicy {
    open_when_empty: bool,
}

impl AllowListPolicy {
    pub fn new(config: &AccessPolicyConfig) -> Self {
        Self {
            open_when_empty: config.open_when_allow_list_empty,
        }
    }
}

impl AccessPolicy for AllowListPolicy {
    fn name(&self) -> &'static str {
        "allow_list"
    }

    fn evaluate(&self, ctx: &PolicyContext<'_>) -> PolicyVerdict {
        if ctx.allow_list.is_empty() {
            return if self.open_when_empty {
                PolicyVerdict::Allow
            } else {
                PolicyVerdict::Abstain
            };
        }
        if ctx.allow_list.contains(&ctx.identity.id) {
            PolicyVerdict::Allow
        } else {
            PolicyVerdict::Abstain
        }
    }
}

/// Allows callers holding the form's view-any capability.
pub struct ViewAnyPolicy {
    evaluator: Arc<dyn CapabilityEvaluator>,
}

impl ViewAnyPolicy {
    pub fn new(evaluator: Arc<dyn CapabilityEvaluator>) -> Self {
        Self { evaluator }
    }
}

impl AccessPolicy for ViewAnyPolicy {
    fn name(&self) -> &'static str {
        VIEW_ANY_CAPABILITY
    }

    fn evaluate(&self, ctx: &PolicyContext<'_>) -> PolicyVerdict {
        if self
            .evaluator
            .evaluate(ctx.form, ctx.identity, VIEW_ANY_CAPABILITY)
        {
            PolicyVerdict::Allow
        } else {
            PolicyVerdict::Abstain
        }
    }
}

/// Reduce a chain of policies to a single verdict.
///
/// Returns the reduced verdict and the name of the policy that granted access.
pub fn reduce_chain(
    policies: &[Box<dyn AccessPolicy>],
    ctx: &PolicyContext<'_>,
) -> (PolicyVerdict, Option<&'static str>) {
    for policy in policies {
        if policy.evaluate(ctx) == PolicyVerdict::Allow {
            return (PolicyVerdict::Allow, Some(policy.name()));
        }
    }
    (PolicyVerdict::Deny, None)
}

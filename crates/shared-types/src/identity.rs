//! Caller identity as established by the authentication layer.

use crate::entities::UserId;
use serde::{Deserialize, Serialize};

/// How the caller's identity was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    Anonymous,
    /// API key presented in a header or query parameter.
    ApiKey,
    /// Interactive session cookie.
    Session,
}

/// The caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User id; `0` for anonymous callers.
    pub id: UserId,
    pub authenticated: bool,
    pub scheme: AuthScheme,
}

impl Identity {
    pub const ANONYMOUS_ID: UserId = 0;

    pub fn anonymous() -> Self {
        Self {
            id: Self::ANONYMOUS_ID,
            authenticated: false,
            scheme: AuthScheme::Anonymous,
        }
    }

    /// Identity established through an API key.
    pub fn api_key(id: UserId) -> Self {
        Self {
            id,
            authenticated: true,
            scheme: AuthScheme::ApiKey,
        }
    }

    /// Identity established through an interactive session.
    pub fn session(id: UserId) -> Self {
        Self {
            id,
            authenticated: true,
            scheme: AuthScheme::Session,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        !self.authenticated
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity() {
        let identity = Identity::default();
        assert_eq!(identity.id, 0);
        assert!(identity.is_anonymous());
        assert_eq!(identity.scheme, AuthScheme::Anonymous);
    }

    #[test]
    fn test_api_key_identity() {
        let identity = Identity::api_key(42);
        assert!(identity.authenticated);
        assert_eq!(identity.scheme, AuthScheme::ApiKey);
        assert!(!identity.is_anonymous());
    }
}

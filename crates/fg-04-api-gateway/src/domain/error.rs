//! API Gateway error types with HTTP status mapping.
//!
//! Every error leaving a handler or middleware is rendered as
//! `{"error": {"code": "...", "message": "..."}}`.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use fg_01_access_control::AccessError;
use fg_02_submission_query::QueryError;
use fg_03_submission_enrichment::EnrichmentError;
use shared_types::StoreError;
use std::fmt;
use tracing::error;

/// Stable machine-readable error codes
pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const INVALID_PARAMETER: &str = "invalid_parameter";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_FOUND: &str = "not_found";
    pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";
    pub const TIMEOUT: &str = "timeout";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// API error with HTTP status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Error code
    pub code: &'static str,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Malformed request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message)
    }

    /// A query parameter could not be parsed
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::INVALID_PARAMETER, message)
    }

    /// Anonymous caller denied
    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::UNAUTHORIZED,
            "Access denied",
        )
    }

    /// Authenticated caller denied
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, codes::FORBIDDEN, "Access denied")
    }

    /// Access denied for the given caller kind
    pub fn access_denied(anonymous: bool) -> Self {
        if anonymous {
            Self::unauthorized()
        } else {
            Self::forbidden()
        }
    }

    /// Resource not found
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            codes::NOT_FOUND,
            format!("{} not found", resource),
        )
    }

    /// Request body over the configured limit
    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            codes::PAYLOAD_TOO_LARGE,
            format!("Request body exceeds {} bytes", limit),
        )
    }

    /// Request timeout
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, codes::TIMEOUT, message)
    }

    /// Internal error. The cause is logged, not returned.
    pub fn internal(cause: impl fmt::Display) -> Self {
        error!(error = %cause, "Request failed");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL_ERROR,
            "Internal error",
        )
    }

    /// JSON body of this error
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::to_vec(&self.to_json()).unwrap_or_default();
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if self.status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer realm=\"formgate\""),
            );
        }
        response
    }
}

// Conversions from domain errors

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownForm(id) => ApiError::not_found(format!("Form {}", id)),
            StoreError::WriteRejected(reason) => ApiError::bad_request(reason),
            other => ApiError::internal(other),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        if e.is_not_found() {
            return ApiError::not_found("Form");
        }
        match e {
            AccessError::Storage(store) => store.into(),
            other => ApiError::internal(other),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match e {
            QueryError::InvalidParameter { .. } => ApiError::invalid_parameter(e.to_string()),
            QueryError::Storage(store) => store.into(),
        }
    }
}

impl From<EnrichmentError> for ApiError {
    fn from(e: EnrichmentError) -> Self {
        ApiError::internal(e)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and shutdown)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server terminated with an error
    #[error("server error: {0}")]
    Serve(String),
}

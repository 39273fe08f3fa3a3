//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use shared_types::UserId;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Base URL used in links returned to clients
    pub public_base_url: String,
    /// Request limits
    pub limits: LimitsConfig,
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Access policy configuration
    pub access: AccessConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            public_base_url: "http://localhost:8080".to_string(),
            limits: LimitsConfig::default(),
            timeouts: TimeoutConfig::default(),
            cors: CorsConfig::default(),
            access: AccessConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        if self.timeouts.default.as_millis() == 0 {
            return Err(ConfigError::InvalidTimeout(
                "default timeout cannot be 0".into(),
            ));
        }

        let base = self.public_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.public_base_url.clone()));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
    /// Enable HTTP server
    pub enabled: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            enabled: true,
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 1MB)
    pub max_request_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024,
        }
    }
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Timeout applied to every request
    #[serde(with = "humantime_serde")]
    pub default: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(10),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "PATCH".to_string(),
                "OPTIONS".to_string(),
            ],
            allowed_headers: vec![
                "Content-Type".to_string(),
                "Authorization".to_string(),
                "X-API-Key".to_string(),
            ],
            max_age: 86400, // 24 hours
        }
    }
}

/// Access policy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Forms whose allow-list resolves to no user are open to everyone
    pub open_when_allow_list_empty: bool,
    /// Users holding the view-any capability on every form
    pub view_any_users: Vec<UserId>,
    /// Anonymous callers hold the view-any capability
    pub anonymous_view_any: bool,
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Public base URL is not an absolute http(s) URL
    #[error("invalid public base url: {0}")]
    InvalidBaseUrl(String),
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        // "ms" must be checked before "s" and "m"
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map_err(|_| "invalid minutes")
                .and_then(|m| m.checked_mul(60).ok_or("invalid minutes"))
                .map(Duration::from_secs)
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}

//! Service configuration
//!
//! Resolved once at startup and injected into [`crate::ServiceClient`];
//! nothing in the core reads the environment at request time.

use crate::error::CoreError;
use std::time::Duration;

/// Base address used when no override is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable consulted by the binary for the base address
pub const BASE_URL_ENV: &str = "RENTBOARD_API_URL";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the prediction/analytics service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base address without trailing slash (e.g. `http://127.0.0.1:5000`)
    base_url: String,

    /// Timeout applied to every request
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// Create a config from an explicit base address
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, CoreError> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "service base URL is empty".to_string(),
            });
        }

        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(CoreError::InvalidConfig {
                message: format!("service base URL must start with http:// or https://: {}", trimmed),
            });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Resolve from an optional override, falling back to the local default
    pub fn from_override(base_url: Option<&str>) -> Result<Self, CoreError> {
        match base_url {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path (`"feature_importance"` or `"/predict"`)
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

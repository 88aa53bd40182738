//! Configuration for the account service client.
//!
//! Provides the account service endpoint (base URL plus the auth token the
//! SDK acts on behalf of) and timeout settings. Configuration is loaded from
//! environment variables with sensible defaults for local development.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the account service endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEndpoint {
    /// Base URL for the service (e.g., "https://account.internal").
    pub base_url: String,

    /// Auth token whose permissions and quotas the client reads.
    ///
    /// The token is opaque to the SDK; its validity is decided entirely by
    /// the account service. Without one, permission reads return nothing.
    pub auth_token: Option<String>,
}

impl AccountEndpoint {
    /// Create an endpoint with no auth token.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    /// Attach an auth token to the endpoint.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Check if an auth token is set.
    pub fn has_token(&self) -> bool {
        self.auth_token.is_some()
    }
}

/// Client configuration for the account service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Account service endpoint.
    pub account: AccountEndpoint,

    /// Request timeout in seconds.
    pub default_timeout_secs: u64,
}

impl Default for AccountConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            account: AccountEndpoint {
                base_url: "http://localhost:3002".to_string(),
                auth_token: None,
            },
            default_timeout_secs: 30,
        }
    }
}

impl AccountConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACCOUNT_API_URL`: Account service URL (default: http://localhost:3002)
    /// - `ACCOUNT_AUTH_TOKEN`: Auth token to act on behalf of
    /// - `ACCOUNT_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            account: AccountEndpoint {
                base_url: std::env::var("ACCOUNT_API_URL").unwrap_or(default.account.base_url),
                auth_token: std::env::var("ACCOUNT_AUTH_TOKEN").ok(),
            },
            default_timeout_secs: std::env::var("ACCOUNT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.default_timeout_secs),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }
}

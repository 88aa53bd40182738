//! Account service client.
//!
//! HTTP client for the account service. Resolves which resources an auth
//! token is granted on, and reads resource quotas for organizations. All
//! permission filtering is delegated to [`account_perms`]; this module only
//! maps requests and responses.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use account_perms::PermissionTree;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::{AccountConfig, AccountEndpoint};
use crate::error::{AccountError, AccountResult};

/// Account service client.
///
/// Every operation issues at most one request and holds no state across
/// calls: no caching, no retries, no token refresh. The client is cheap to
/// clone and safe to reuse.
#[derive(Clone)]
pub struct AccountClient {
    /// HTTP client instance.
    client: Client,

    /// Account service endpoint and auth token.
    endpoint: AccountEndpoint,
}

/// Wire shape of `GET /tokens/{token}/permissions`.
#[derive(Debug, Deserialize)]
struct PermissionsResponse {
    /// A missing field deserializes to an empty tree.
    #[serde(default)]
    permissions: PermissionTree,
}

/// Wire shape of `GET /organizations/{organization}/quotas`.
#[derive(Debug, Deserialize)]
struct QuotasResponse {
    quotas: HashMap<String, u64>,
}

impl AccountClient {
    /// Create a new account client.
    pub fn new(endpoint: AccountEndpoint, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, endpoint }
    }

    /// Create a client from a loaded configuration.
    pub fn from_config(config: &AccountConfig) -> Self {
        Self::new(config.account.clone(), config.timeout())
    }

    /// The auth token the client acts on behalf of, if any.
    pub fn token(&self) -> Option<&str> {
        self.endpoint.auth_token.as_deref()
    }

    /// Replace the auth token the client acts on behalf of.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.endpoint.auth_token = Some(token.into());
    }

    /// Get the resources the auth token is granted, optionally filtered.
    ///
    /// Fetches the token's full permission tree from the account service and
    /// filters it by `service` (exact match), `name`, and `resource` (both
    /// hierarchical path filters, see [`account_perms::PermissionPath`]).
    /// Absent filters match everything. The result is deduplicated and
    /// unordered.
    ///
    /// Without an auth token this returns an empty set and performs no
    /// request: no token means no permissions, not an error.
    ///
    /// # Errors
    ///
    /// - [`AccountError::BadToken`] if the service does not know the token
    ///   (HTTP 404).
    /// - [`AccountError::ExpiredToken`] if the token is no longer valid
    ///   (HTTP 410).
    /// - [`AccountError::Api`] for any other error status, carried through
    ///   untranslated.
    #[instrument(skip(self))]
    pub async fn get_resources(
        &self,
        service: Option<&str>,
        name: Option<&str>,
        resource: Option<&str>,
    ) -> AccountResult<HashSet<String>> {
        let token = match self.endpoint.auth_token.as_deref() {
            Some(token) => token,
            None => {
                debug!("No auth token set, skipping permissions lookup");
                return Ok(HashSet::new());
            }
        };

        debug!("Fetching token permissions");

        let url = self.endpoint.url(&format!("/tokens/{}/permissions", token));
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => {
                warn!("Account service does not recognize the auth token");
                return Err(AccountError::BadToken);
            }
            reqwest::StatusCode::GONE => {
                warn!("Auth token has expired");
                return Err(AccountError::ExpiredToken);
            }
            _ => {}
        }

        let body: PermissionsResponse = self.handle_response(response).await?;
        let resources = body.permissions.resources(service, name, resource);

        debug!(count = resources.len(), "Resolved granted resources");
        Ok(resources)
    }

    /// Check if the auth token has a permission.
    ///
    /// True when [`AccountClient::get_resources`] with the same filters is
    /// non-empty. Same error behavior.
    pub async fn has_permission(
        &self,
        service: Option<&str>,
        name: Option<&str>,
        resource: Option<&str>,
    ) -> AccountResult<bool> {
        Ok(!self.get_resources(service, name, resource).await?.is_empty())
    }

    /// Get the resource quotas of an organization.
    ///
    /// Returns the quota map of the response verbatim. Error statuses surface
    /// as [`AccountError::Api`] without translation.
    #[instrument(skip(self))]
    pub async fn get_quotas(&self, organization: &str) -> AccountResult<HashMap<String, u64>> {
        debug!("Fetching organization quotas");

        let url = self
            .endpoint
            .url(&format!("/organizations/{}/quotas", organization));
        let mut request = self.client.get(&url);

        if let Some(ref token) = self.endpoint.auth_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let body: QuotasResponse = self.handle_response(response).await?;
        Ok(body.quotas)
    }

    /// Get one quota of an organization.
    ///
    /// Returns `None` when the organization has no quota for `resource`.
    pub async fn get_quota(
        &self,
        organization: &str,
        resource: &str,
    ) -> AccountResult<Option<u64>> {
        Ok(self.get_quotas(organization).await?.get(resource).copied())
    }

    /// Check whether an organization still has quota left for a resource.
    ///
    /// True iff a quota exists for `resource` and `used` is strictly below
    /// it. An unknown resource has no quota to consume, so this is false
    /// regardless of `used`.
    pub async fn has_quota(
        &self,
        organization: &str,
        resource: &str,
        used: u64,
    ) -> AccountResult<bool> {
        let quotas = self.get_quotas(organization).await?;
        Ok(quotas.get(resource).map_or(false, |&limit| used < limit))
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T>(&self, response: reqwest::Response) -> AccountResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Account API error ({}): {}", status.as_u16(), message);
            return Err(AccountError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AccountError::InvalidResponse(e.to_string()))
    }
}

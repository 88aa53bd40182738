//! # Account Client
//!
//! This crate provides the HTTP client for the account service, answering
//! two questions on behalf of an application:
//! - Does this auth token have a given permission, and on which resources?
//! - How much quota does an organization have for a resource?
//!
//! ## Overview
//!
//! The account-client crate handles:
//! - **Permission reads**: Fetching a token's permission tree and filtering
//!   it down to granted resources
//! - **Quota reads**: Fetching an organization's resource quotas
//! - **Error mapping**: Translating the token-specific HTTP statuses into a
//!   typed error taxonomy
//! - **Configuration**: Endpoint, token, and timeout settings with
//!   environment loading
//!
//! Every call is a live remote lookup: the client caches nothing, retries
//! nothing, and refreshes nothing.
//!
//! ## Remote API
//!
//! - `GET /tokens/{token}/permissions` returns the token's full permission
//!   tree; 404 means the token is unknown, 410 means it has expired.
//! - `GET /organizations/{organization}/quotas` returns the organization's
//!   quota map.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use account_client::{AccountClient, AccountEndpoint};
//! use std::time::Duration;
//!
//! async fn check() -> Result<(), account_client::AccountError> {
//!     let endpoint = AccountEndpoint::new("https://account.internal")
//!         .with_token("a-token");
//!     let client = AccountClient::new(endpoint, Duration::from_secs(30));
//!
//!     // Does the token grant reading any compute server?
//!     if client
//!         .has_permission(Some("compute"), Some("servers:read"), None)
//!         .await?
//!     {
//!         println!("granted");
//!     }
//!
//!     // Can org-1 still create servers?
//!     let ok = client.has_quota("org-1", "servers", 5).await?;
//!     println!("quota left: {}", ok);
//!     Ok(())
//! }
//! ```
//!
//! Callers deciding on re-authentication flows can match
//! [`AccountError::is_invalid_token`] instead of the individual token error
//! variants.

pub mod client;
pub mod config;
pub mod error;

// Re-export main types
pub use client::AccountClient;
pub use config::{AccountConfig, AccountEndpoint};
pub use error::{AccountError, AccountResult};

// Re-export the permission model for callers that filter locally
pub use account_perms::{PermissionPath, PermissionTree};

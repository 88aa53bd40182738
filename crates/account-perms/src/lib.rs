//! # Account Permissions
//!
//! This crate provides the permission model for the account service:
//! hierarchical permission paths and the permission trees granted to auth
//! tokens, shared by the SDK client and anything else that needs to reason
//! about grants without talking to the service.
//!
//! ## Overview
//!
//! The account-perms crate handles:
//! - **Permission paths**: Colon-delimited hierarchical scopes
//! - **Grant matching**: Deciding whether a granted path covers a request
//! - **Permission trees**: The full grant set of a token, with filtering
//!
//! ## Architecture
//!
//! ```text
//! Permission path = segment[:segment[:segment...]]
//!
//! Examples:
//!   "servers:read"        - Read access to servers
//!   "servers:*"           - Any action on servers
//!   "request:auth:read"   - Nested scope, arbitrary depth
//! ```
//!
//! Matching walks both paths left to right and stops at the first mismatch.
//! A granted `*` covers any requested segment at its position, and a granted
//! path shorter than the request covers the request's tail. The reverse does
//! not hold: a grant deeper than the request only covers it through trailing
//! wildcards.
//!
//! ## Usage
//!
//! ```rust
//! use account_perms::{PermissionPath, PermissionTree};
//!
//! // Path matching
//! assert!(PermissionPath::matches(Some("request:auth:read"), "request:*"));
//! assert!(!PermissionPath::matches(Some("request:log:write"), "request:log:read"));
//!
//! // Tree filtering
//! let mut tree = PermissionTree::new();
//! tree.grant("compute", "servers:read", ["srv-1", "srv-2"]);
//!
//! assert!(tree.grants(Some("compute"), Some("servers:read"), None));
//! assert_eq!(tree.resources(None, None, None).len(), 2);
//! ```

pub mod path;
pub mod tree;

// Re-export main types for convenience
pub use path::{PermissionPath, WILDCARD};
pub use tree::PermissionTree;

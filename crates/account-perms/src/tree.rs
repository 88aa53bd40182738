//! # Permission trees
//!
//! The full set of permissions effectively granted to an auth token, as
//! returned by the account service, and the filtering pipeline that reduces
//! it to a set of resource names.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::path::PermissionPath;

/// All permissions effectively granted to a token.
///
/// A tree maps service names to permission names to the resources those
/// permissions apply to:
///
/// ```text
/// {
///   "compute": {
///     "servers:read": ["srv-1", "srv-2"],
///     "servers:*":    ["srv-3"]
///   },
///   "storage": { ... }
/// }
/// ```
///
/// Trees deserialize directly from that nested mapping; a missing key at any
/// level is just an empty mapping.
///
/// # Example
///
/// ```
/// use account_perms::PermissionTree;
///
/// let mut tree = PermissionTree::new();
/// tree.grant("compute", "servers:read", ["srv-1", "srv-2"]);
///
/// let resources = tree.resources(Some("compute"), None, None);
/// assert_eq!(resources.len(), 2);
/// assert!(tree.grants(None, Some("servers:read"), None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTree {
    entries: HashMap<String, HashMap<String, Vec<String>>>,
}

impl PermissionTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a granted permission on a set of resources.
    pub fn grant<I, S>(&mut self, service: &str, name: &str, resources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(service.to_string())
            .or_default()
            .entry(name.to_string())
            .or_default()
            .extend(resources.into_iter().map(Into::into));
    }

    /// Check if the tree grants nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The service names that have at least one granted permission.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Collect the resources granted by this tree, optionally filtered.
    ///
    /// Filters are applied in order:
    ///
    /// 1. Keep services equal to `service`, or all of them when `service` is
    ///    absent.
    /// 2. Within kept services, keep permission names covered by the `name`
    ///    path filter (granted-side wildcards apply, see
    ///    [`PermissionPath::matches`]).
    /// 3. Within kept permissions, keep resource names covered by the
    ///    `resource` path filter.
    /// 4. Union the survivors into a single set.
    ///
    /// Duplicates across services and permissions collapse; iteration order
    /// of the result is unspecified.
    pub fn resources(
        &self,
        service: Option<&str>,
        name: Option<&str>,
        resource: Option<&str>,
    ) -> HashSet<String> {
        let mut matched = HashSet::new();

        for (granted_service, permissions) in &self.entries {
            if !service.map_or(true, |service| service == granted_service) {
                continue;
            }

            for (granted_name, granted_resources) in permissions {
                if !PermissionPath::matches(name, granted_name) {
                    continue;
                }

                matched.extend(
                    granted_resources
                        .iter()
                        .filter(|granted| PermissionPath::matches(resource, granted))
                        .cloned(),
                );
            }
        }

        matched
    }

    /// Check whether the tree grants any resource under the given filters.
    pub fn grants(
        &self,
        service: Option<&str>,
        name: Option<&str>,
        resource: Option<&str>,
    ) -> bool {
        !self.resources(service, name, resource).is_empty()
    }
}

impl From<HashMap<String, HashMap<String, Vec<String>>>> for PermissionTree {
    fn from(entries: HashMap<String, HashMap<String, Vec<String>>>) -> Self {
        Self { entries }
    }
}

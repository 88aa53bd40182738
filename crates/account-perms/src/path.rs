//! # Permission paths
//!
//! Colon-delimited hierarchical permission paths and the rules for deciding
//! whether a granted path covers a requested one.

use std::fmt;

/// The wildcard segment in a granted permission path.
///
/// A granted `*` matches any requested segment at that position, including
/// the absence of one.
pub const WILDCARD: &str = "*";

/// A hierarchical permission path.
///
/// A path is an ordered sequence of string segments produced by splitting a
/// colon-delimited string. Paths are plain values: two paths with the same
/// segments are the same permission.
///
/// # Example
///
/// ```
/// use account_perms::PermissionPath;
///
/// let granted = PermissionPath::new("servers:*");
/// let requested = PermissionPath::new("servers:reboot");
/// assert!(granted.grants(&requested));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionPath {
    segments: Vec<String>,
}

impl PermissionPath {
    /// Create a path by splitting a colon-delimited string into segments.
    ///
    /// # Example
    ///
    /// ```
    /// use account_perms::PermissionPath;
    ///
    /// let path = PermissionPath::new("request:auth:read");
    /// assert_eq!(path.segments(), ["request", "auth", "read"]);
    /// ```
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            segments: path.as_ref().split(':').map(str::to_string).collect(),
        }
    }

    /// The ordered segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The number of segments in this path.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Check whether this granted path covers `requested`.
    ///
    /// Segments are compared positionally from left to right, and the
    /// comparison is padded so that the longer path is walked in full:
    ///
    /// - A granted `*` matches whatever the requested path has at that
    ///   position, including nothing at all.
    /// - A granted path shorter than the request matches the trailing
    ///   requested segments (implicit wildcard past its end).
    /// - Any other granted segment must equal the requested segment exactly.
    ///   A concrete granted segment with no requested counterpart is a
    ///   mismatch, so a grant deeper than the request does not cover it.
    ///
    /// The first mismatching pair decides the outcome.
    ///
    /// # Example
    ///
    /// ```
    /// use account_perms::PermissionPath;
    ///
    /// let read = PermissionPath::new("request:auth:read");
    /// assert!(PermissionPath::new("request:auth:*").grants(&read));
    /// assert!(PermissionPath::new("request:*").grants(&read));
    /// assert!(!PermissionPath::new("request:log:*").grants(&read));
    /// ```
    pub fn grants(&self, requested: &PermissionPath) -> bool {
        let depth = self.segments.len().max(requested.segments.len());

        (0..depth).all(
            |i| match (self.segments.get(i), requested.segments.get(i)) {
                (Some(granted), _) if granted.as_str() == WILDCARD => true,
                (None, _) => true,
                (Some(granted), Some(requested)) => granted == requested,
                (Some(_), None) => false,
            },
        )
    }

    /// Evaluate an optional request filter against a granted permission string.
    ///
    /// An absent filter matches every granted permission; a present one is
    /// parsed and checked with [`PermissionPath::grants`]. This is the form
    /// the tree filtering pipeline consumes.
    ///
    /// # Example
    ///
    /// ```
    /// use account_perms::PermissionPath;
    ///
    /// assert!(PermissionPath::matches(None, "servers:read"));
    /// assert!(PermissionPath::matches(Some("servers:read"), "servers:*"));
    /// assert!(!PermissionPath::matches(Some("servers:read"), "volumes:*"));
    /// ```
    pub fn matches(request: Option<&str>, granted: &str) -> bool {
        match request {
            None => true,
            Some(request) => PermissionPath::new(granted).grants(&PermissionPath::new(request)),
        }
    }
}

impl fmt::Display for PermissionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(":"))
    }
}

impl From<&str> for PermissionPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

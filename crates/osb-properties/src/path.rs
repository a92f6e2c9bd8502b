//! Dotted property paths
//!
//! Provides [`PropertyPath`] for addressing values inside nested
//! property trees.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path into a property tree
///
/// Ordered list of at least one non-empty segment, produced by
/// splitting a dotted configuration name.
///
/// # Examples
/// - `elasticsearch.cluster_name` → `["elasticsearch", "cluster_name"]`
/// - `elasticsearch.xpack.security.enabled`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    /// Create a path from segments
    ///
    /// # Errors
    /// Returns [`MalformedPathError`] if `segments` is empty or any
    /// segment is the empty string.
    pub fn new(segments: Vec<String>) -> Result<Self, MalformedPathError> {
        if segments.is_empty() {
            return Err(MalformedPathError::Empty);
        }
        if segments.iter().any(String::is_empty) {
            return Err(MalformedPathError::EmptySegment);
        }
        Ok(Self(segments))
    }

    /// Parse a dotted path string
    ///
    /// # Errors
    /// Returns [`MalformedPathError`] for the empty string and for
    /// paths with empty segments such as `a..b` or `a.`.
    pub fn parse(path: &str) -> Result<Self, MalformedPathError> {
        if path.is_empty() {
            return Err(MalformedPathError::Empty);
        }
        Self::new(path.split('.').map(str::to_string).collect())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments (always ≥ 1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Final segment
    #[inline]
    #[must_use]
    pub fn last(&self) -> &str {
        // Invariant: a PropertyPath is never empty.
        &self.0[self.0.len() - 1]
    }

    /// Split into the intermediate segments and the final segment
    #[inline]
    #[must_use]
    pub fn split_last(&self) -> (&[String], &str) {
        // Invariant: a PropertyPath is never empty.
        let split = self.0.len() - 1;
        (&self.0[..split], &self.0[split])
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for PropertyPath {
    type Err = MalformedPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors for malformed dotted paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedPathError {
    /// Path has no segments at all
    #[error("property path is empty")]
    Empty,

    /// Path contains an empty segment
    #[error("property path contains an empty segment")]
    EmptySegment,
}

//! Nested property trees addressed by dotted paths
//!
//! Provides [`PropertyTree`], the generic nested key-value structure
//! behind deployment manifest properties and plan metadata, together
//! with structural [`read`](PropertyTree::read) and
//! [`write`](PropertyTree::write) operations.
//!
//! The Map/Leaf distinction is an explicit variant rather than a
//! runtime type test, so traversal and write are exhaustive matches.

use crate::path::PropertyPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A node in a property tree
///
/// Each node is either a map of named children or a leaf holding an
/// opaque scalar/array value. Trees are owned by the caller (manifest
/// or plan metadata); the engine never retains references across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyTree {
    /// Inner node: named children
    Map(BTreeMap<String, PropertyTree>),

    /// Terminal value
    Leaf(Value),
}

impl PropertyTree {
    /// Create an empty map node
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// Create a leaf node
    #[inline]
    pub fn leaf(value: impl Into<Value>) -> Self {
        Self::Leaf(value.into())
    }

    /// Check whether this node is a map
    #[inline]
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Leaf value of this node, if it is a leaf
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Map(_) => None,
        }
    }

    /// Read the node stored at `path`
    ///
    /// Walks intermediate segments, which must all resolve to present
    /// map nodes. At the final segment an absent key is a legitimate
    /// `Ok(None)`, not an error. The returned node may itself be a map
    /// (callers inspect map-valued properties such as plugin sets).
    ///
    /// # Errors
    /// - [`ReadError::MissingIntermediate`] if a non-final segment is absent
    /// - [`ReadError::NotAMap`] if a traversed node is a leaf
    pub fn read(&self, path: &PropertyPath) -> Result<Option<&PropertyTree>, ReadError> {
        let (intermediate, last) = path.split_last();

        let mut current = self;
        for (depth, segment) in intermediate.iter().enumerate() {
            let Self::Map(children) = current else {
                return Err(ReadError::NotAMap {
                    at: join_prefix(path, depth),
                });
            };
            current = children
                .get(segment)
                .ok_or_else(|| ReadError::MissingIntermediate {
                    at: join_prefix(path, depth + 1),
                })?;
        }

        match current {
            Self::Map(children) => Ok(children.get(last)),
            Self::Leaf(_) => Err(ReadError::NotAMap {
                at: join_prefix(path, path.len() - 1),
            }),
        }
    }

    /// Write `node` at `path`, creating intermediate maps as needed
    ///
    /// Existing map nodes along the way are reused. Overwrites at the
    /// final segment are unconditional between nodes of the same kind;
    /// replacing a map with a leaf (or a leaf with a map) is a
    /// structural conflict, never a silent merge.
    ///
    /// # Errors
    /// Returns [`StructuralConflictError`] if any traversed node,
    /// including the root, is present but not a map, or if the final
    /// write would change an existing node's kind.
    pub fn write(
        &mut self,
        path: &PropertyPath,
        node: impl Into<PropertyTree>,
    ) -> Result<(), StructuralConflictError> {
        let node = node.into();
        let (intermediate, last) = path.split_last();

        let mut current = self;
        for (depth, segment) in intermediate.iter().enumerate() {
            let Self::Map(children) = current else {
                return Err(StructuralConflictError {
                    at: join_prefix(path, depth),
                });
            };
            current = children
                .entry(segment.clone())
                .or_insert_with(PropertyTree::empty);
        }

        let Self::Map(children) = current else {
            return Err(StructuralConflictError {
                at: join_prefix(path, path.len() - 1),
            });
        };

        if let Some(existing) = children.get(last) {
            if existing.is_map() != node.is_map() {
                return Err(StructuralConflictError {
                    at: path.to_string(),
                });
            }
        }
        children.insert(last.to_string(), node);
        Ok(())
    }
}

impl Default for PropertyTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for PropertyTree {
    fn from(value: Value) -> Self {
        Self::Leaf(value)
    }
}

impl From<&str> for PropertyTree {
    fn from(value: &str) -> Self {
        Self::Leaf(Value::from(value))
    }
}

impl From<String> for PropertyTree {
    fn from(value: String) -> Self {
        Self::Leaf(Value::from(value))
    }
}

impl From<bool> for PropertyTree {
    fn from(value: bool) -> Self {
        Self::Leaf(Value::from(value))
    }
}

impl From<i64> for PropertyTree {
    fn from(value: i64) -> Self {
        Self::Leaf(Value::from(value))
    }
}

/// Dotted prefix of `path` up to (not including) segment `depth`,
/// for error reporting. Depth 0 names the root.
fn join_prefix(path: &PropertyPath, depth: usize) -> String {
    if depth == 0 {
        "<root>".to_string()
    } else {
        path.segments()[..depth].join(".")
    }
}

/// Structural failures while reading a property
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// A non-final segment was absent
    #[error("could not access property: intermediate map '{at}' is missing")]
    MissingIntermediate {
        /// Dotted prefix that was absent
        at: String,
    },

    /// A traversed node was a leaf where a map was required
    #[error("could not access property: '{at}' is not a map")]
    NotAMap {
        /// Dotted prefix of the offending node
        at: String,
    },
}

/// A write collided with an existing node of a different kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("structural conflict at '{at}': existing node is not compatible")]
pub struct StructuralConflictError {
    /// Dotted prefix of the conflicting node
    at: String,
}

impl StructuralConflictError {
    /// Dotted prefix of the conflicting node
    #[inline]
    #[must_use]
    pub fn at(&self) -> &str {
        &self.at
    }
}

//! Property tree engine for the service broker
//!
//! Generic nested key-value structures addressed by dotted paths.
//! Deployment manifests and plan metadata are both represented as
//! [`PropertyTree`] values; [`PropertyPath`] addresses individual
//! properties for structural reads and writes.
//!
//! # Example
//!
//! ```rust
//! use osb_properties::{PropertyPath, PropertyTree};
//!
//! let mut tree = PropertyTree::empty();
//! let path: PropertyPath = "elasticsearch.cluster_name".parse().unwrap();
//! tree.write(&path, "elasticsearch-2f9a").unwrap();
//!
//! let node = tree.read(&path).unwrap().unwrap();
//! assert_eq!(
//!     node.as_value().and_then(|v| v.as_str()),
//!     Some("elasticsearch-2f9a"),
//! );
//! ```

#![warn(unreachable_pub)]

mod path;
mod tree;

pub use path::{MalformedPathError, PropertyPath};
pub use tree::{PropertyTree, ReadError, StructuralConflictError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

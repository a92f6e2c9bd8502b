//! Deployment manifest templating for the service broker
//!
//! Computes and injects per-instance values (cluster name,
//! reserved-user passwords) into the property trees of a deployment
//! manifest's instance groups. The manifest itself is owned by the
//! deployment orchestrator; this crate only stamps properties.

#![warn(unreachable_pub)]

mod injector;
mod manifest;

pub use injector::{
    minimum_master_nodes, reserved_password_key, InjectError, PropertyInjector, INSTANCE_GROUPS,
    RESERVED_USERS,
};
pub use manifest::{InstanceGroup, Manifest};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

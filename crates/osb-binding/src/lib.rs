//! Credential lifecycle for clustered service instances
//!
//! Provisions and revokes per-tenant access credentials against a
//! clustered backend, trying candidate nodes in a fixed failover order
//! and persisting the result exactly once.
//!
//! # Core pieces
//!
//! - [`AccessMode`]: closed set of binding purposes; unknown identifiers
//!   fall back to egress with a warning
//! - [`failover::attempt`]: ordered try-each-host executor shared by
//!   account creation, deletion and connectivity probing
//! - [`CredentialService`]: the provisioning/deprovisioning
//!   orchestrator, generic over the [`ClusterAdmin`], [`SecretStore`]
//!   and [`SecretGenerator`] strategies
//!
//! All operations are synchronous and sequential; retries happen
//! across hosts only, never against the same host twice.

#![warn(unreachable_pub)]

mod admin;
mod deprovision;
mod error;
mod model;
mod provision;
mod secret;
mod store;

pub mod failover;
pub mod mode;
pub mod plan;

pub use admin::{ClusterAdmin, Endpoint, RemoteAdminApiError, Scheme, MANAGER_ROLE};
pub use error::{DeprovisionError, ProvisionError};
pub use failover::{FailoverError, FailoverSuccess, HostFailure};
pub use mode::{AccessMode, HostGroupSelector, ModeFallback, ModeResolution, SUPER_ADMIN};
pub use model::{connection_url, Credential, NodeAddress, ServiceInstance, TargetHost};
pub use plan::{Plan, PlanMetadata};
pub use provision::{BindingRequest, CredentialService, ProvisionedBinding};
pub use secret::{RandomSecrets, SecretGenerator};
pub use store::{SecretStore, SecretStoreError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

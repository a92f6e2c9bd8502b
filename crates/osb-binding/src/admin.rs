//! Remote administrative operations
//!
//! The cluster's own administrative wire protocol is an external
//! collaborator; this crate owns only the [`ClusterAdmin`] strategy
//! trait and endpoint assembly. Implementations speak HTTP with basic
//! authentication against a single node.

use crate::model::{Credential, TargetHost};
use std::fmt::{self, Display, Formatter};

/// Role assigned to dynamically created binding accounts
pub const MANAGER_ROLE: &str = "manager";

/// URL suffix of the account-management endpoint
const USERS_PATH: &str = "_xpack/security/user";

/// Transport scheme for administrative endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP
    Http,

    /// HTTP over TLS
    Https,
}

impl Scheme {
    /// Scheme implied by the plan's transport-security flag
    #[inline]
    #[must_use]
    pub fn from_transport_security(enabled: bool) -> Self {
        if enabled {
            Self::Https
        } else {
            Self::Http
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Http => "http",
            Self::Https => "https",
        })
    }
}

/// Administrative endpoint of a single cluster node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Transport scheme
    pub scheme: Scheme,

    /// The node
    pub host: TargetHost,
}

impl Endpoint {
    /// Create an endpoint
    #[inline]
    #[must_use]
    pub fn new(scheme: Scheme, host: TargetHost) -> Self {
        Self { scheme, host }
    }

    /// Account-management URL of this node
    #[must_use]
    pub fn users_url(&self) -> String {
        format!("{self}/{USERS_PATH}")
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Non-success outcome of a single remote administrative call
///
/// Captured per host inside an aggregated failover failure; it is not
/// surfaced individually unless every candidate host fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteAdminApiError {
    /// The node could not be reached at all
    #[error("host unreachable: {0}")]
    Unreachable(String),

    /// The node answered with a non-success status
    #[error("administrative API returned status {0}")]
    Status(u16),
}

/// Administrative operations against one cluster node
///
/// The strategy seam between the generic provisioning orchestrator and
/// a concrete backend. Implementations perform one blocking call per
/// invocation; any per-call timeout is imposed here, not by the caller.
pub trait ClusterAdmin {
    /// Create `username` with `password` and `role` on the node
    ///
    /// # Errors
    /// Returns [`RemoteAdminApiError`] when the node is unreachable or
    /// answers with a non-success status.
    fn create_account(
        &self,
        endpoint: &Endpoint,
        admin: &Credential,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<(), RemoteAdminApiError>;

    /// Delete `username` on the node
    ///
    /// # Errors
    /// Returns [`RemoteAdminApiError`] when the node is unreachable or
    /// answers with a non-success status.
    fn delete_account(
        &self,
        endpoint: &Endpoint,
        admin: &Credential,
        username: &str,
    ) -> Result<(), RemoteAdminApiError>;

    /// Probe the node for reachability
    ///
    /// # Errors
    /// Returns [`RemoteAdminApiError::Unreachable`] when the node does
    /// not answer.
    fn ping(&self, endpoint: &Endpoint) -> Result<(), RemoteAdminApiError>;
}

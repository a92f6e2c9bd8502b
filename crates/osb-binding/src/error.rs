//! Error types for credential provisioning and deprovisioning

use crate::admin::RemoteAdminApiError;
use crate::failover::{FailoverError, HostFailure};
use crate::mode::HostGroupSelector;
use crate::store::SecretStoreError;

/// Hard failures of a provisioning request
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// The target host group contained no candidates
    #[error("no candidate hosts for binding")]
    NoCandidates {
        /// The selector that matched nothing
        selector: HostGroupSelector,
    },

    /// Account creation failed on every candidate host
    #[error("binding failed on all available hosts")]
    Exhausted {
        /// Per-host failures, in failover order
        failures: Vec<HostFailure<RemoteAdminApiError>>,
    },

    /// The secret store failed
    ///
    /// When persistence fails after a successful remote creation, a
    /// compensating account deletion has already been attempted.
    #[error(transparent)]
    SecretStore(#[from] SecretStoreError),
}

/// Hard failures of a deprovisioning request
#[derive(Debug, thiserror::Error)]
pub enum DeprovisionError {
    /// The target host group contained no candidates
    #[error("no candidate hosts for unbinding")]
    NoCandidates {
        /// The selector that matched nothing
        selector: HostGroupSelector,
    },

    /// Account deletion failed on every candidate host
    ///
    /// The secret-store entry is left intact so the still-existing
    /// remote account keeps its local record.
    #[error("cannot delete binding: all hosts failed")]
    Exhausted {
        /// Per-host failures, in failover order
        failures: Vec<HostFailure<RemoteAdminApiError>>,
    },

    /// The secret store failed
    #[error(transparent)]
    SecretStore(#[from] SecretStoreError),
}

impl ProvisionError {
    pub(crate) fn from_failover(
        error: FailoverError<RemoteAdminApiError>,
        selector: HostGroupSelector,
    ) -> Self {
        match error {
            FailoverError::NoCandidates => Self::NoCandidates { selector },
            FailoverError::Exhausted(failures) => Self::Exhausted { failures },
        }
    }
}

impl DeprovisionError {
    pub(crate) fn from_failover(
        error: FailoverError<RemoteAdminApiError>,
        selector: HostGroupSelector,
    ) -> Self {
        match error {
            FailoverError::NoCandidates => Self::NoCandidates { selector },
            FailoverError::Exhausted(failures) => Self::Exhausted { failures },
        }
    }
}

//! Access modes and host-group routing
//!
//! A binding request names the purpose of the requested credentials via
//! the `clientMode` parameter. Unknown or missing identifiers never fail
//! a request; they fall back to [`AccessMode::Egress`] with a warning.

use crate::plan::Plan;

/// Request parameter carrying the access-mode identifier
pub const CLIENT_MODE_PARAMETER: &str = "clientMode";

/// Requested purpose/identity class for a binding
///
/// Egress and ingress bindings get a dynamically created per-binding
/// account; the remaining modes resolve to fixed, pre-provisioned
/// accounts that are fetched from the secret store and never created or
/// deleted by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// General outbound client traffic (the default)
    Egress,

    /// Inbound data shippers
    Ingress,

    /// The cluster superuser (`elastic`)
    Superuser,

    /// The dashboard service account (`kibana`)
    Kibana,

    /// The log-pipeline monitoring account (`logstash_system`)
    LogstashSystem,
}

impl AccessMode {
    /// Wire identifier of this mode
    #[inline]
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Egress => "egress",
            Self::Ingress => "ingress",
            Self::Superuser => "superuser",
            Self::Kibana => "kibana",
            Self::LogstashSystem => "logstash_system",
        }
    }

    /// Look up a mode by its exact wire identifier
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "egress" => Some(Self::Egress),
            "ingress" => Some(Self::Ingress),
            "superuser" => Some(Self::Superuser),
            "kibana" => Some(Self::Kibana),
            "logstash_system" => Some(Self::LogstashSystem),
            _ => None,
        }
    }

    /// Whether this mode is backed by a fixed, pre-provisioned account
    #[inline]
    #[must_use]
    pub fn is_builtin(self) -> bool {
        self.builtin_username().is_some()
    }

    /// Username of the backing builtin account, if any
    #[inline]
    #[must_use]
    pub fn builtin_username(self) -> Option<&'static str> {
        match self {
            Self::Egress | Self::Ingress => None,
            Self::Superuser => Some(SUPER_ADMIN),
            Self::Kibana => Some("kibana"),
            Self::LogstashSystem => Some("logstash_system"),
        }
    }

    /// Resolve an optional identifier, defaulting to [`Self::Egress`]
    ///
    /// Never fails: the fallback, if any, is reported alongside the
    /// resolved mode so callers can log it.
    #[must_use]
    pub fn resolve(identifier: Option<&str>) -> ModeResolution {
        match identifier {
            None => ModeResolution {
                mode: Self::Egress,
                fallback: Some(ModeFallback::Missing),
            },
            Some(raw) => match Self::from_identifier(raw) {
                Some(mode) => ModeResolution {
                    mode,
                    fallback: None,
                },
                None => ModeResolution {
                    mode: Self::Egress,
                    fallback: Some(ModeFallback::Unknown(raw.to_string())),
                },
            },
        }
    }
}

/// Username of the cluster superuser account
pub const SUPER_ADMIN: &str = "elastic";

/// Outcome of access-mode resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeResolution {
    /// The resolved mode (the default when a fallback fired)
    pub mode: AccessMode,

    /// Why the default was used, if it was
    pub fallback: Option<ModeFallback>,
}

/// Recoverable access-mode fallback conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeFallback {
    /// No identifier was supplied
    Missing,

    /// The supplied identifier matched no known mode
    Unknown(String),
}

/// Resolve an identifier and log the fallback, if any
///
/// This is the routing entry point used by provisioning: requests are
/// never failed solely because of an unrecognized mode string.
#[must_use]
pub fn resolve_or_default(identifier: Option<&str>) -> AccessMode {
    let resolution = AccessMode::resolve(identifier);
    match &resolution.fallback {
        Some(ModeFallback::Missing) => {
            tracing::warn!(
                "encountered no {CLIENT_MODE_PARAMETER}, using default '{}'",
                resolution.mode.identifier()
            );
        }
        Some(ModeFallback::Unknown(raw)) => {
            tracing::warn!(
                "encountered unknown {CLIENT_MODE_PARAMETER} '{raw}', using default '{}'",
                resolution.mode.identifier()
            );
        }
        None => {}
    }
    resolution.mode
}

/// Which hosts of an instance a binding operation may target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostGroupSelector {
    /// Only hosts of the named instance group
    Group(String),

    /// Every host of the instance
    All,
}

impl HostGroupSelector {
    /// Whether a node in `group` is selected
    #[inline]
    #[must_use]
    pub fn matches(&self, group: &str) -> bool {
        match self {
            Self::Group(name) => name == group,
            Self::All => true,
        }
    }
}

/// Map a mode to the host group its operations target
///
/// Builtin modes bypass host-group filtering entirely; they resolve to
/// a stored account and need no host selection.
#[must_use]
pub fn target_group(mode: AccessMode, plan: &Plan) -> HostGroupSelector {
    match mode {
        AccessMode::Egress => HostGroupSelector::Group(plan.metadata.egress_group.clone()),
        AccessMode::Ingress => HostGroupSelector::Group(plan.metadata.ingress_group.clone()),
        AccessMode::Superuser | AccessMode::Kibana | AccessMode::LogstashSystem => {
            HostGroupSelector::All
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanMetadata;
    use osb_properties::PropertyTree;

    fn plan() -> Plan {
        Plan::new(
            "xs",
            PlanMetadata {
                egress_group: "coordinating_nodes".to_string(),
                ingress_group: "ingest_nodes".to_string(),
                properties: PropertyTree::empty(),
            },
        )
    }

    #[test]
    fn identifiers_round_trip() {
        for mode in [
            AccessMode::Egress,
            AccessMode::Ingress,
            AccessMode::Superuser,
            AccessMode::Kibana,
            AccessMode::LogstashSystem,
        ] {
            assert_eq!(AccessMode::from_identifier(mode.identifier()), Some(mode));
        }
    }

    #[test]
    fn known_identifier_resolves_without_fallback() {
        let resolution = AccessMode::resolve(Some("ingress"));
        assert_eq!(resolution.mode, AccessMode::Ingress);
        assert_eq!(resolution.fallback, None);
    }

    #[test]
    fn unknown_identifier_falls_back_to_egress() {
        let resolution = AccessMode::resolve(Some("not-a-real-mode"));
        assert_eq!(resolution.mode, AccessMode::Egress);
        assert_eq!(
            resolution.fallback,
            Some(ModeFallback::Unknown("not-a-real-mode".to_string()))
        );
    }

    #[test]
    fn missing_identifier_falls_back_to_egress() {
        let resolution = AccessMode::resolve(None);
        assert_eq!(resolution.mode, AccessMode::Egress);
        assert_eq!(resolution.fallback, Some(ModeFallback::Missing));
    }

    #[test]
    fn builtin_partition() {
        assert!(!AccessMode::Egress.is_builtin());
        assert!(!AccessMode::Ingress.is_builtin());
        assert!(AccessMode::Superuser.is_builtin());
        assert!(AccessMode::Kibana.is_builtin());
        assert!(AccessMode::LogstashSystem.is_builtin());
    }

    #[test]
    fn builtin_usernames() {
        assert_eq!(AccessMode::Superuser.builtin_username(), Some("elastic"));
        assert_eq!(AccessMode::Kibana.builtin_username(), Some("kibana"));
        assert_eq!(
            AccessMode::LogstashSystem.builtin_username(),
            Some("logstash_system")
        );
    }

    #[test]
    fn egress_targets_egress_group() {
        assert_eq!(
            target_group(AccessMode::Egress, &plan()),
            HostGroupSelector::Group("coordinating_nodes".to_string())
        );
    }

    #[test]
    fn ingress_targets_ingress_group() {
        assert_eq!(
            target_group(AccessMode::Ingress, &plan()),
            HostGroupSelector::Group("ingest_nodes".to_string())
        );
    }

    #[test]
    fn builtin_modes_bypass_filtering() {
        assert_eq!(target_group(AccessMode::Kibana, &plan()), HostGroupSelector::All);
    }
}

//! Domain model shared by provisioning and deployment
//!
//! Hosts, node addresses, credentials and service instances. All types
//! are plain owned data; collaborators exchange them by value.

use crate::mode::HostGroupSelector;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A candidate cluster node
///
/// Ordering of hosts is significant and caller-supplied; it is the
/// failover order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetHost {
    /// Node address (IP or DNS name)
    pub address: String,

    /// Administrative HTTP port
    pub port: u16,
}

impl TargetHost {
    /// Create a new host
    #[inline]
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }
}

impl Display for TargetHost {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// A cluster node together with the instance group it belongs to
///
/// The group name is what egress/ingress host filtering matches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAddress {
    /// Instance-group name, e.g. `coordinating_nodes`
    pub group: String,

    /// The node itself
    pub host: TargetHost,
}

impl NodeAddress {
    /// Create a new node address
    #[inline]
    pub fn new(group: impl Into<String>, host: TargetHost) -> Self {
        Self {
            group: group.into(),
            host,
        }
    }
}

/// A username/password pair
///
/// Owned exclusively by the secret store once persisted; provisioning
/// holds only a transient copy while a request is in flight.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Account name
    pub username: String,

    /// Opaque secret value
    pub password: String,
}

impl Credential {
    /// Create a new credential
    #[inline]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Passwords stay out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A provisioned cluster instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    /// Unique instance identifier
    pub id: String,

    /// Cluster nodes in failover order
    pub nodes: Vec<NodeAddress>,
}

impl ServiceInstance {
    /// Create a new instance
    #[inline]
    pub fn new(id: impl Into<String>, nodes: Vec<NodeAddress>) -> Self {
        Self {
            id: id.into(),
            nodes,
        }
    }

    /// Hosts matching `selector`, preserving failover order
    #[must_use]
    pub fn hosts_in(&self, selector: &HostGroupSelector) -> Vec<TargetHost> {
        self.nodes
            .iter()
            .filter(|node| selector.matches(&node.group))
            .map(|node| node.host.clone())
            .collect()
    }

    /// All hosts, preserving failover order
    #[must_use]
    pub fn hosts(&self) -> Vec<TargetHost> {
        self.nodes.iter().map(|node| node.host.clone()).collect()
    }
}

/// Comma-joined `address:port` list for multi-host connection strings
#[must_use]
pub fn connection_url(hosts: &[TargetHost]) -> String {
    hosts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ServiceInstance {
        ServiceInstance::new(
            "f3f0e2",
            vec![
                NodeAddress::new("coordinating_nodes", TargetHost::new("10.0.0.1", 9200)),
                NodeAddress::new("data_nodes", TargetHost::new("10.0.0.2", 9200)),
                NodeAddress::new("coordinating_nodes", TargetHost::new("10.0.0.3", 9200)),
            ],
        )
    }

    #[test]
    fn host_display() {
        assert_eq!(TargetHost::new("10.0.0.1", 9200).to_string(), "10.0.0.1:9200");
    }

    #[test]
    fn hosts_in_group_preserves_order() {
        let hosts = instance().hosts_in(&HostGroupSelector::Group("coordinating_nodes".into()));
        assert_eq!(
            hosts,
            vec![TargetHost::new("10.0.0.1", 9200), TargetHost::new("10.0.0.3", 9200)]
        );
    }

    #[test]
    fn hosts_in_all_keeps_everything() {
        assert_eq!(instance().hosts_in(&HostGroupSelector::All).len(), 3);
    }

    #[test]
    fn connection_url_joins_hosts() {
        let hosts = vec![TargetHost::new("a", 9200), TargetHost::new("b", 9201)];
        assert_eq!(connection_url(&hosts), "a:9200,b:9201");
    }

    #[test]
    fn credential_debug_redacts_password() {
        let credential = Credential::new("elastic", "hunter2");
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("elastic"));
        assert!(!rendered.contains("hunter2"));
    }
}

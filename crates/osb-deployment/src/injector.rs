//! Manifest property injection
//!
//! Stamps computed values (cluster name, reserved-user passwords) into
//! every instance group's property tree before a manifest is handed to
//! the deployment orchestrator.

use crate::manifest::Manifest;
use osb_binding::{Credential, SecretGenerator, ServiceInstance};
use osb_properties::{MalformedPathError, PropertyPath, PropertyTree, StructuralConflictError};
use serde_json::Value;

/// Instance-group names this broker deploys
pub const INSTANCE_GROUPS: [&str; 7] = [
    "elasticsearch",
    "ingest_nodes",
    "coordinating_nodes",
    "general_nodes",
    "machine_learning_nodes",
    "data_nodes",
    "master_eligible_nodes",
];

/// Reserved accounts seeded into every deployment
pub const RESERVED_USERS: [&str; 4] = ["elastic", "kibana", "logstash_system", "drain-monitor"];

const CLUSTER_NAME_PROPERTY: &str = "elasticsearch.cluster_name";
const MINIMUM_MASTER_NODES_PROPERTY: &str = "elasticsearch.discovery.minimum_master_nodes";

/// Stamps per-instance values into manifest property trees
#[derive(Debug)]
pub struct PropertyInjector<G> {
    secrets: G,
}

impl<G: SecretGenerator> PropertyInjector<G> {
    /// Create an injector with the given secret source
    #[inline]
    pub fn new(secrets: G) -> Self {
        Self { secrets }
    }

    /// Inject the cluster name and one fresh password per reserved user
    /// into every instance group of `manifest`
    ///
    /// A given reserved user gets the same password across all groups.
    /// The generated credentials are returned so the caller can record
    /// them on the service instance.
    ///
    /// # Errors
    /// [`InjectError::NoKnownGroups`] if the manifest contains none of
    /// the known instance groups, and [`InjectError::Conflict`] if a
    /// group's existing properties structurally collide with an
    /// injected path.
    pub fn inject(
        &self,
        manifest: &mut Manifest,
        instance: &ServiceInstance,
    ) -> Result<Vec<Credential>, InjectError> {
        if !manifest
            .instance_groups
            .iter()
            .any(|group| INSTANCE_GROUPS.contains(&group.name.as_str()))
        {
            return Err(InjectError::NoKnownGroups);
        }

        let cluster_name = format!("elasticsearch-{}", instance.id);
        let reserved: Vec<Credential> = RESERVED_USERS
            .iter()
            .map(|user| Credential::new(*user, self.secrets.generate()))
            .collect();

        for group in &mut manifest.instance_groups {
            write_into(
                &mut group.properties,
                &group.name,
                CLUSTER_NAME_PROPERTY,
                cluster_name.as_str(),
            )?;
            for credential in &reserved {
                let key = reserved_password_key(&credential.username);
                write_into(
                    &mut group.properties,
                    &group.name,
                    &key,
                    credential.password.as_str(),
                )?;
            }
        }

        tracing::debug!(
            "injected cluster name '{cluster_name}' and {} reserved users into {} instance groups",
            reserved.len(),
            manifest.instance_groups.len()
        );
        Ok(reserved)
    }
}

/// Dotted key of a reserved user's password property
#[must_use]
pub fn reserved_password_key(username: &str) -> String {
    format!("elasticsearch.xpack.users.reserved.{username}.password")
}

/// Plan-declared minimum number of master-eligible nodes, defaulting
/// to 1 when the property is absent or not a number
#[must_use]
pub fn minimum_master_nodes(plan: &osb_binding::Plan) -> i64 {
    let Ok(path) = PropertyPath::parse(MINIMUM_MASTER_NODES_PROPERTY) else {
        return 1;
    };
    match plan.metadata.properties.read(&path) {
        Ok(Some(PropertyTree::Leaf(Value::Number(count)))) => count.as_i64().unwrap_or(1),
        _ => 1,
    }
}

fn write_into(
    properties: &mut PropertyTree,
    group: &str,
    key: &str,
    value: &str,
) -> Result<(), InjectError> {
    let path = PropertyPath::parse(key)?;
    properties
        .write(&path, value)
        .map_err(|source| InjectError::Conflict {
            group: group.to_string(),
            source,
        })
}

/// Failures while stamping manifest properties
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    /// The manifest contains no known instance group
    #[error("manifest contains no known instance group")]
    NoKnownGroups,

    /// An injected property key was malformed
    #[error("invalid property key: {0}")]
    Path(#[from] MalformedPathError),

    /// A group's existing properties collide with an injected path
    #[error("conflicting properties in instance group '{group}': {source}")]
    Conflict {
        /// The offending instance group
        group: String,
        /// The underlying structural conflict
        source: StructuralConflictError,
    },
}

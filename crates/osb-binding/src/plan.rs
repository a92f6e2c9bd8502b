//! Service plans and plan-declared feature flags
//!
//! Plan metadata carries the per-plan property tree from the catalog.
//! Feature flags are read through dotted paths; a missing or unreadable
//! flag is logged and treated as disabled rather than failing the
//! request.

use osb_properties::{PropertyPath, PropertyTree};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const PROPERTY_SECURITY_ENABLED: &str = "elasticsearch.xpack.security.enabled";
const PROPERTY_TLS_ENABLED: &str = "elasticsearch.xpack.security.http.ssl.enabled";

/// A service plan from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Plan name, for diagnostics
    pub name: String,

    /// Plan metadata
    pub metadata: PlanMetadata,
}

/// Catalog metadata attached to a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    /// Instance group serving egress bindings
    pub egress_group: String,

    /// Instance group serving ingress bindings
    pub ingress_group: String,

    /// Plan-declared property tree
    pub properties: PropertyTree,
}

impl Plan {
    /// Create a new plan
    #[inline]
    pub fn new(name: impl Into<String>, metadata: PlanMetadata) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }

    /// Whether dynamic account management is enabled for this plan
    #[must_use]
    pub fn security_enabled(&self) -> bool {
        self.flag(PROPERTY_SECURITY_ENABLED)
    }

    /// Whether the transport-security feature (HTTPS) is enabled
    #[must_use]
    pub fn transport_security_enabled(&self) -> bool {
        self.flag(PROPERTY_TLS_ENABLED)
    }

    /// Read a boolean flag at `key`, defaulting to `false`
    ///
    /// Accepts a boolean leaf or the strings `"true"`/`"false"`, as
    /// plan properties arrive from YAML catalogs with either typing.
    fn flag(&self, key: &str) -> bool {
        let path = match PropertyPath::parse(key) {
            Ok(path) => path,
            Err(err) => {
                tracing::error!("invalid property key '{key}': {err}");
                return false;
            }
        };

        match self.metadata.properties.read(&path) {
            Ok(Some(node)) => node.as_value().is_some_and(truthy),
            Ok(None) => {
                tracing::error!("property '{key}' is missing for plan '{}'", self.name);
                false
            }
            Err(err) => {
                tracing::error!("property '{key}' is unreadable for plan '{}': {err}", self.name);
                false
            }
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

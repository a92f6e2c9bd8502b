//! Deployment manifest model
//!
//! Just enough structure to address the per-instance-group property
//! trees; everything else in a manifest passes through untouched by
//! this crate's collaborators.

use osb_properties::PropertyTree;
use serde::{Deserialize, Serialize};

/// A deployment manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Deployment name
    pub name: String,

    /// Instance groups in manifest order
    pub instance_groups: Vec<InstanceGroup>,
}

/// One instance group of a deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroup {
    /// Group name, e.g. `coordinating_nodes`
    pub name: String,

    /// Number of instances in the group
    #[serde(default)]
    pub instances: u32,

    /// Group-scoped property tree
    #[serde(default)]
    pub properties: PropertyTree,
}

impl Manifest {
    /// Parse a manifest from YAML
    ///
    /// # Errors
    /// Returns the underlying `serde_yaml` error for malformed input.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Render this manifest as YAML
    ///
    /// # Errors
    /// Returns the underlying `serde_yaml` error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osb_properties::PropertyPath;
    use serde_json::json;

    const MANIFEST: &str = "\
name: elasticsearch-2f9a
instance_groups:
  - name: coordinating_nodes
    instances: 2
    properties:
      elasticsearch:
        node:
          master: false
  - name: data_nodes
    instances: 3
";

    #[test]
    fn parses_yaml_manifest() {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        assert_eq!(manifest.name, "elasticsearch-2f9a");
        assert_eq!(manifest.instance_groups.len(), 2);
        assert_eq!(manifest.instance_groups[0].instances, 2);

        let node = manifest.instance_groups[0]
            .properties
            .read(&PropertyPath::parse("elasticsearch.node.master").unwrap())
            .unwrap();
        assert_eq!(
            node.and_then(PropertyTree::as_value),
            Some(&json!(false))
        );
    }

    #[test]
    fn absent_properties_default_to_empty_map() {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        assert_eq!(manifest.instance_groups[1].properties, PropertyTree::empty());
    }

    #[test]
    fn yaml_round_trip() {
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let rendered = manifest.to_yaml().unwrap();
        assert_eq!(Manifest::from_yaml(&rendered).unwrap(), manifest);
    }
}

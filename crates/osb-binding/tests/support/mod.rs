//! Shared fakes and fixtures for binding integration tests

// Not every test file uses every fixture.
#![allow(dead_code)]

use osb_binding::{
    ClusterAdmin, Credential, Endpoint, NodeAddress, Plan, PlanMetadata, RemoteAdminApiError,
    SecretGenerator, SecretStore, SecretStoreError, ServiceInstance, TargetHost,
};
use osb_properties::{PropertyPath, PropertyTree};
use std::collections::HashMap;
use std::sync::Mutex;

/// Backend fake that refuses configured addresses and records calls
pub struct ScriptedAdmin {
    down: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedAdmin {
    pub fn all_up() -> Self {
        Self::with_down(&[])
    }

    pub fn with_down(down: &[&str]) -> Self {
        Self {
            down: down.iter().map(ToString::to_string).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &str, endpoint: &Endpoint) -> Result<(), RemoteAdminApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation}@{}", endpoint.host));
        if self.down.contains(&endpoint.host.address) {
            Err(RemoteAdminApiError::Unreachable(endpoint.host.to_string()))
        } else {
            Ok(())
        }
    }
}

impl ClusterAdmin for ScriptedAdmin {
    fn create_account(
        &self,
        endpoint: &Endpoint,
        _admin: &Credential,
        _username: &str,
        _password: &str,
        _role: &str,
    ) -> Result<(), RemoteAdminApiError> {
        self.record("create", endpoint)
    }

    fn delete_account(
        &self,
        endpoint: &Endpoint,
        _admin: &Credential,
        _username: &str,
    ) -> Result<(), RemoteAdminApiError> {
        self.record("delete", endpoint)
    }

    fn ping(&self, endpoint: &Endpoint) -> Result<(), RemoteAdminApiError> {
        self.record("ping", endpoint)
    }
}

/// In-memory secret store, optionally refusing writes
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), Credential>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_writes: false,
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn seed(&self, instance_id: &str, id: &str, username: &str, password: &str) {
        self.entries.lock().unwrap().insert(
            (instance_id.to_string(), id.to_string()),
            Credential::new(username, password),
        );
    }

    pub fn get(&self, instance_id: &str, id: &str) -> Option<Credential> {
        self.entries
            .lock()
            .unwrap()
            .get(&(instance_id.to_string(), id.to_string()))
            .cloned()
    }
}

impl SecretStore for MemoryStore {
    fn create_user(
        &self,
        instance_id: &str,
        id: &str,
        username: &str,
        password: &str,
    ) -> Result<(), SecretStoreError> {
        if self.fail_writes {
            return Err(SecretStoreError::Backend("write refused".to_string()));
        }
        self.entries.lock().unwrap().insert(
            (instance_id.to_string(), id.to_string()),
            Credential::new(username, password),
        );
        Ok(())
    }

    fn get_user(&self, instance_id: &str, id: &str) -> Result<Credential, SecretStoreError> {
        self.get(instance_id, id).ok_or_else(|| SecretStoreError::NotFound {
            instance_id: instance_id.to_string(),
            id: id.to_string(),
        })
    }

    fn delete_credentials(&self, instance_id: &str, id: &str) -> Result<(), SecretStoreError> {
        self.entries
            .lock()
            .unwrap()
            .remove(&(instance_id.to_string(), id.to_string()))
            .map(|_| ())
            .ok_or_else(|| SecretStoreError::NotFound {
                instance_id: instance_id.to_string(),
                id: id.to_string(),
            })
    }
}

/// Deterministic secret generator
pub struct FixedSecrets(pub &'static str);

impl SecretGenerator for FixedSecrets {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Generator that fails the test when invoked at all
pub struct NoSecrets;

impl SecretGenerator for NoSecrets {
    fn generate(&self) -> String {
        panic!("secret generated where none was expected");
    }
}

pub const INSTANCE_ID: &str = "instance-2f9a";

/// Three coordinating nodes plus one ingest node, in failover order
pub fn instance() -> ServiceInstance {
    ServiceInstance::new(
        INSTANCE_ID,
        vec![
            NodeAddress::new("coordinating_nodes", TargetHost::new("10.0.0.1", 9200)),
            NodeAddress::new("coordinating_nodes", TargetHost::new("10.0.0.2", 9200)),
            NodeAddress::new("coordinating_nodes", TargetHost::new("10.0.0.3", 9200)),
            NodeAddress::new("ingest_nodes", TargetHost::new("10.0.1.1", 9200)),
        ],
    )
}

fn plan(security: bool, tls: bool) -> Plan {
    let mut properties = PropertyTree::empty();
    properties
        .write(&path("elasticsearch.xpack.security.enabled"), security)
        .unwrap();
    properties
        .write(&path("elasticsearch.xpack.security.http.ssl.enabled"), tls)
        .unwrap();

    Plan::new(
        "s",
        PlanMetadata {
            egress_group: "coordinating_nodes".to_string(),
            ingress_group: "ingest_nodes".to_string(),
            properties,
        },
    )
}

pub fn secure_plan() -> Plan {
    plan(true, true)
}

pub fn plain_http_plan() -> Plan {
    plan(true, false)
}

pub fn insecure_plan() -> Plan {
    plan(false, false)
}

fn path(key: &str) -> PropertyPath {
    PropertyPath::parse(key).unwrap()
}

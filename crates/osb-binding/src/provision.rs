//! Credential provisioning
//!
//! Orchestrates a binding request from mode resolution through remote
//! account creation, persistence and connection-string assembly. The
//! concrete backend ([`ClusterAdmin`]), persistence ([`SecretStore`])
//! and randomness ([`SecretGenerator`]) are injected strategies.

use crate::admin::{ClusterAdmin, Endpoint, Scheme, MANAGER_ROLE};
use crate::error::ProvisionError;
use crate::failover::{self, FailoverError};
use crate::mode::{resolve_or_default, target_group, AccessMode, SUPER_ADMIN};
use crate::model::{connection_url, Credential, ServiceInstance, TargetHost};
use crate::plan::Plan;
use crate::secret::SecretGenerator;
use crate::store::SecretStore;

/// A tenant's request for (or release of) access to an instance
#[derive(Debug, Clone, Copy)]
pub struct BindingRequest<'a> {
    /// Caller-supplied binding identifier; doubles as the dynamic
    /// account's username
    pub binding_id: &'a str,

    /// Raw access-mode identifier, if the caller supplied one
    pub mode: Option<&'a str>,
}

/// Successful outcome of a provisioning request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedBinding {
    /// The resolved access mode
    pub mode: AccessMode,

    /// Assembled connection string
    pub uri: String,

    /// The binding's credential; `None` for anonymous access
    pub credential: Option<Credential>,

    /// Host the binding was established against; `None` for builtin
    /// modes, which involve no host selection
    pub host: Option<TargetHost>,
}

/// Credential lifecycle orchestrator
///
/// One instance serves any number of sequential requests; requests for
/// different binding ids share no mutable state here.
#[derive(Debug)]
pub struct CredentialService<A, S, G> {
    admin: A,
    store: S,
    secrets: G,
}

impl<A, S, G> CredentialService<A, S, G> {
    /// The injected backend
    #[inline]
    pub fn admin(&self) -> &A {
        &self.admin
    }

    /// The injected secret store
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<A, S, G> CredentialService<A, S, G>
where
    A: ClusterAdmin,
    S: SecretStore,
    G: SecretGenerator,
{
    /// Create a service from its collaborators
    #[inline]
    pub fn new(admin: A, store: S, secrets: G) -> Self {
        Self {
            admin,
            store,
            secrets,
        }
    }

    /// Provision credentials for one binding
    ///
    /// Builtin modes return the stored account without any host I/O or
    /// secret generation. When the plan has no dynamic account
    /// management, a credential-free URI against a reachable host is
    /// returned instead. Otherwise a per-binding account is created on
    /// the first candidate host that accepts it and persisted exactly
    /// once.
    ///
    /// # Errors
    /// [`ProvisionError::Exhausted`] when every candidate host fails,
    /// [`ProvisionError::NoCandidates`] for an empty host group, and
    /// [`ProvisionError::SecretStore`] for persistence failures. On any
    /// failure no new secret-store entry exists for the binding.
    pub fn provision(
        &self,
        request: &BindingRequest<'_>,
        instance: &ServiceInstance,
        plan: &Plan,
    ) -> Result<ProvisionedBinding, ProvisionError> {
        tracing::info!("creating credentials for binding '{}'", request.binding_id);
        let mode = resolve_or_default(request.mode);

        if !plan.security_enabled() {
            return self.provision_anonymous(mode, instance, plan);
        }

        if let Some(username) = mode.builtin_username() {
            return self.provision_builtin(mode, username, instance, plan);
        }

        self.provision_dynamic(mode, request.binding_id, instance, plan)
    }

    /// Anonymous access: the plan runs without account management, so
    /// the URI carries no credential and uses plain HTTP.
    fn provision_anonymous(
        &self,
        mode: AccessMode,
        instance: &ServiceInstance,
        plan: &Plan,
    ) -> Result<ProvisionedBinding, ProvisionError> {
        let selector = target_group(mode, plan);
        let hosts = instance.hosts_in(&selector);

        let reachable = failover::attempt(&hosts, |host| {
            self.admin.ping(&Endpoint::new(Scheme::Http, host.clone()))
        })
        .map_err(|error| ProvisionError::from_failover(error, selector))?;

        let uri = format!("{}://{}", Scheme::Http, reachable.host);
        Ok(ProvisionedBinding {
            mode,
            uri,
            credential: None,
            host: Some(reachable.host),
        })
    }

    /// Builtin short-circuit: fetch the fixed account, no host I/O.
    fn provision_builtin(
        &self,
        mode: AccessMode,
        username: &str,
        instance: &ServiceInstance,
        plan: &Plan,
    ) -> Result<ProvisionedBinding, ProvisionError> {
        let credential = self.store.get_user(&instance.id, username)?;
        let scheme = Scheme::from_transport_security(plan.transport_security_enabled());

        let uri = format!(
            "{scheme}://{}:{}@{}",
            credential.username,
            credential.password,
            connection_url(&instance.hosts())
        );
        Ok(ProvisionedBinding {
            mode,
            uri,
            credential: Some(credential),
            host: None,
        })
    }

    /// Dynamic account creation with ordered host failover.
    fn provision_dynamic(
        &self,
        mode: AccessMode,
        binding_id: &str,
        instance: &ServiceInstance,
        plan: &Plan,
    ) -> Result<ProvisionedBinding, ProvisionError> {
        let scheme = Scheme::from_transport_security(plan.transport_security_enabled());
        let admin = self.store.get_user(&instance.id, SUPER_ADMIN)?;
        let password = self.secrets.generate();

        let selector = target_group(mode, plan);
        let hosts = instance.hosts_in(&selector);

        let created = failover::attempt(&hosts, |host| {
            let endpoint = Endpoint::new(scheme, host.clone());
            self.admin
                .create_account(&endpoint, &admin, binding_id, &password, MANAGER_ROLE)
        })
        .map_err(|error| {
            if matches!(error, FailoverError::Exhausted(_)) {
                tracing::error!("binding '{binding_id}' failed on all available hosts");
            }
            ProvisionError::from_failover(error, selector)
        })?;

        if let Err(store_error) =
            self.store
                .create_user(&instance.id, binding_id, binding_id, &password)
        {
            // The remote account exists but has no local record; delete
            // it again so a failed request leaves nothing behind.
            let endpoint = Endpoint::new(scheme, created.host.clone());
            if let Err(cleanup) = self.admin.delete_account(&endpoint, &admin, binding_id) {
                tracing::error!(
                    "could not remove account '{binding_id}' on {endpoint} after store failure: {cleanup}"
                );
            }
            return Err(store_error.into());
        }

        let credential = Credential::new(binding_id, password);
        let uri = format!(
            "{scheme}://{}:{}@{}",
            credential.username, credential.password, created.host
        );
        tracing::info!(
            "finished creating credentials for binding '{binding_id}' on host {}",
            created.host
        );
        Ok(ProvisionedBinding {
            mode,
            uri,
            credential: Some(credential),
            host: Some(created.host),
        })
    }
}

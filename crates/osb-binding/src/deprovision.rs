//! Credential deprovisioning
//!
//! Mirror of provisioning: delete the remote account first, then the
//! local record. The secret-store entry is removed only after remote
//! deletion succeeds, so a still-existing remote account never loses
//! its local record.

use crate::admin::{ClusterAdmin, Endpoint, Scheme};
use crate::error::DeprovisionError;
use crate::failover::{self, FailoverError};
use crate::mode::{resolve_or_default, target_group, SUPER_ADMIN};
use crate::model::ServiceInstance;
use crate::plan::Plan;
use crate::provision::{BindingRequest, CredentialService};
use crate::secret::SecretGenerator;
use crate::store::SecretStore;

impl<A, S, G> CredentialService<A, S, G>
where
    A: ClusterAdmin,
    S: SecretStore,
    G: SecretGenerator,
{
    /// Release one binding's credentials
    ///
    /// Builtin accounts are never deleted through this path, and plans
    /// without dynamic account management have nothing to delete;
    /// both cases succeed immediately.
    ///
    /// # Errors
    /// [`DeprovisionError::Exhausted`] when every candidate host fails
    /// (the secret-store entry stays intact),
    /// [`DeprovisionError::NoCandidates`] for an empty host group, and
    /// [`DeprovisionError::SecretStore`] for store failures.
    pub fn deprovision(
        &self,
        request: &BindingRequest<'_>,
        instance: &ServiceInstance,
        plan: &Plan,
    ) -> Result<(), DeprovisionError> {
        let binding_id = request.binding_id;
        tracing::info!("deleting binding '{binding_id}'");

        if !plan.security_enabled() {
            tracing::info!("no dynamic account management for binding '{binding_id}', nothing to delete");
            return Ok(());
        }

        let mode = resolve_or_default(request.mode);
        if mode.is_builtin() {
            return Ok(());
        }

        let scheme = Scheme::from_transport_security(plan.transport_security_enabled());
        let admin = self.store().get_user(&instance.id, SUPER_ADMIN)?;

        let selector = target_group(mode, plan);
        let hosts = instance.hosts_in(&selector);

        let deleted = failover::attempt(&hosts, |host| {
            let endpoint = Endpoint::new(scheme, host.clone());
            self.admin().delete_account(&endpoint, &admin, binding_id)
        })
        .map_err(|error| {
            if matches!(error, FailoverError::Exhausted(_)) {
                tracing::error!("cannot delete binding '{binding_id}': all hosts failed");
            }
            DeprovisionError::from_failover(error, selector)
        })?;

        self.store().delete_credentials(&instance.id, binding_id)?;
        tracing::info!(
            "finished deleting binding '{binding_id}' on host {}",
            deleted.host
        );
        Ok(())
    }
}

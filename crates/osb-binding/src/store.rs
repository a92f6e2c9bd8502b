//! Secret store collaborator
//!
//! External system of record for generated credentials, scoped by
//! service instance and purpose. The store must provide atomic per-key
//! create/get/delete; this crate does no locking of its own.

use crate::model::Credential;

/// Credential persistence, keyed by (service instance, purpose)
///
/// The purpose id is a binding id for dynamic accounts and a builtin
/// username for pre-provisioned accounts.
pub trait SecretStore {
    /// Persist a credential
    ///
    /// # Errors
    /// Returns [`SecretStoreError`] when the entry cannot be written.
    fn create_user(
        &self,
        instance_id: &str,
        id: &str,
        username: &str,
        password: &str,
    ) -> Result<(), SecretStoreError>;

    /// Fetch a stored credential
    ///
    /// # Errors
    /// Returns [`SecretStoreError::NotFound`] when no entry exists.
    fn get_user(&self, instance_id: &str, id: &str) -> Result<Credential, SecretStoreError>;

    /// Delete a stored credential
    ///
    /// # Errors
    /// Returns [`SecretStoreError`] when the entry cannot be removed.
    fn delete_credentials(&self, instance_id: &str, id: &str) -> Result<(), SecretStoreError>;
}

/// Secret store failures, surfaced to the caller immediately
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretStoreError {
    /// No credential stored under the given scope
    #[error("no credentials stored for '{id}' in instance '{instance_id}'")]
    NotFound {
        /// Service instance scope
        instance_id: String,
        /// Purpose id within the instance
        id: String,
    },

    /// The store itself failed
    #[error("secret store failure: {0}")]
    Backend(String),
}

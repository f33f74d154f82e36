//! Entity discovery ports.
//!
//! Disabling managed entity discovery touches three collaborators: the store
//! holding the discovery API key, the security service that validates and
//! invalidates API keys, and the manager owning the built-in entity
//! definitions.

use async_trait::async_trait;

use crate::domain::entities::EntityDiscoveryApiKey;
use crate::domain::foundation::DomainError;

/// Where the entity discovery API key is persisted.
#[async_trait]
pub trait EntityDiscoveryKeyStore: Send + Sync {
    /// Returns `None` if no key has been stored.
    async fn read_key(&self) -> Result<Option<EntityDiscoveryApiKey>, DomainError>;

    async fn delete_key(&self) -> Result<(), DomainError>;
}

/// API key lifecycle operations.
#[async_trait]
pub trait ApiKeyService: Send + Sync {
    /// True while the key authenticates successfully.
    async fn is_valid(&self, key: &EntityDiscoveryApiKey) -> Result<bool, DomainError>;

    /// Invalidate keys by id, acting as the internal user.
    async fn invalidate(&self, ids: &[String]) -> Result<(), DomainError>;
}

/// Installs and removes entity definitions.
#[async_trait]
pub trait EntityDefinitionManager: Send + Sync {
    /// Remove every built-in definition, returning the ids removed.
    ///
    /// When `delete_data` is set the indices holding entity data are
    /// removed as well.
    async fn uninstall_builtin_definitions(
        &self,
        key: &EntityDiscoveryApiKey,
        delete_data: bool,
    ) -> Result<Vec<String>, DomainError>;
}

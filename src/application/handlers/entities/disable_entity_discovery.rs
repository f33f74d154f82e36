//! DisableEntityDiscoveryHandler - Command handler for turning managed entity
//! discovery off.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::entities::{EnablementOutcome, ERROR_API_KEY_NOT_FOUND, ERROR_API_KEY_NOT_VALID};
use crate::domain::foundation::DomainError;
use crate::ports::{ApiKeyService, EntityDefinitionManager, EntityDiscoveryKeyStore};

/// Command to disable entity discovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisableEntityDiscoveryCommand {
    /// Also remove the indices holding entity data.
    pub delete_data: bool,
}

/// Errors that can occur while disabling.
///
/// A missing or invalid key is not an error; it is reported through the
/// returned [`EnablementOutcome`].
#[derive(Debug, Clone, Error)]
pub enum DisableEntityDiscoveryError {
    #[error(transparent)]
    Infrastructure(#[from] DomainError),
}

/// Handler for disabling entity discovery.
pub struct DisableEntityDiscoveryHandler {
    key_store: Arc<dyn EntityDiscoveryKeyStore>,
    api_keys: Arc<dyn ApiKeyService>,
    definitions: Arc<dyn EntityDefinitionManager>,
}

impl DisableEntityDiscoveryHandler {
    pub fn new(
        key_store: Arc<dyn EntityDiscoveryKeyStore>,
        api_keys: Arc<dyn ApiKeyService>,
        definitions: Arc<dyn EntityDefinitionManager>,
    ) -> Self {
        Self {
            key_store,
            api_keys,
            definitions,
        }
    }

    pub async fn handle(
        &self,
        cmd: DisableEntityDiscoveryCommand,
    ) -> Result<EnablementOutcome, DisableEntityDiscoveryError> {
        debug!("reading entity discovery API key");
        let Some(key) = self.key_store.read_key().await? else {
            return Ok(EnablementOutcome::failure(ERROR_API_KEY_NOT_FOUND));
        };

        debug!(key_id = %key.id, "validating existing entity discovery API key");
        if !self.api_keys.is_valid(&key).await? {
            return Ok(EnablementOutcome::failure(ERROR_API_KEY_NOT_VALID));
        }

        let removed = self
            .definitions
            .uninstall_builtin_definitions(&key, cmd.delete_data)
            .await?;
        debug!(count = removed.len(), delete_data = cmd.delete_data, "uninstalled built-in definitions");

        self.key_store.delete_key().await?;
        self.api_keys.invalidate(&[key.id.clone()]).await?;

        info!(key_id = %key.id, "entity discovery disabled");
        Ok(EnablementOutcome::success())
    }
}

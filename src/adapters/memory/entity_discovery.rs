//! In-memory entity discovery adapters.
//!
//! One struct implements the key store, the API key service, and the
//! definition manager so tests can inspect every side effect of a disable
//! request in one place.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::EntityDiscoveryApiKey;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{ApiKeyService, EntityDefinitionManager, EntityDiscoveryKeyStore};

#[derive(Debug, Default)]
struct State {
    key: Option<EntityDiscoveryApiKey>,
    valid: bool,
    definitions: Vec<String>,
    invalidated: HashSet<String>,
    data_deleted: bool,
    fail_uninstall: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityDiscovery {
    state: Arc<RwLock<State>>,
}

impl InMemoryEntityDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a key; `valid` controls what validation reports.
    pub async fn store_key(&self, key: EntityDiscoveryApiKey, valid: bool) {
        let mut state = self.state.write().await;
        state.key = Some(key);
        state.valid = valid;
    }

    pub async fn install_definitions(&self, ids: &[&str]) {
        let mut state = self.state.write().await;
        state.definitions.extend(ids.iter().map(|s| s.to_string()));
    }

    /// Makes the next uninstall fail with `message`.
    pub async fn fail_uninstall(&self, message: impl Into<String>) {
        self.state.write().await.fail_uninstall = Some(message.into());
    }

    pub async fn has_key(&self) -> bool {
        self.state.read().await.key.is_some()
    }

    pub async fn installed_definitions(&self) -> Vec<String> {
        self.state.read().await.definitions.clone()
    }

    pub async fn is_invalidated(&self, key_id: &str) -> bool {
        self.state.read().await.invalidated.contains(key_id)
    }

    pub async fn data_deleted(&self) -> bool {
        self.state.read().await.data_deleted
    }
}

#[async_trait]
impl EntityDiscoveryKeyStore for InMemoryEntityDiscovery {
    async fn read_key(&self) -> Result<Option<EntityDiscoveryApiKey>, DomainError> {
        Ok(self.state.read().await.key.clone())
    }

    async fn delete_key(&self) -> Result<(), DomainError> {
        self.state.write().await.key = None;
        Ok(())
    }
}

#[async_trait]
impl ApiKeyService for InMemoryEntityDiscovery {
    async fn is_valid(&self, key: &EntityDiscoveryApiKey) -> Result<bool, DomainError> {
        let state = self.state.read().await;
        Ok(state.valid && !state.invalidated.contains(&key.id))
    }

    async fn invalidate(&self, ids: &[String]) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .invalidated
            .extend(ids.iter().cloned());
        Ok(())
    }
}

#[async_trait]
impl EntityDefinitionManager for InMemoryEntityDiscovery {
    async fn uninstall_builtin_definitions(
        &self,
        _key: &EntityDiscoveryApiKey,
        delete_data: bool,
    ) -> Result<Vec<String>, DomainError> {
        let mut state = self.state.write().await;
        if let Some(message) = state.fail_uninstall.take() {
            return Err(DomainError::new(ErrorCode::InternalError, message));
        }
        state.data_deleted = delete_data;
        Ok(std::mem::take(&mut state.definitions))
    }
}

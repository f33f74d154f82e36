//! In-memory saved query repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SavedQueryId};
use crate::domain::saved_query::SavedQuery;
use crate::ports::SavedQueryRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemorySavedQueryRepository {
    queries: Arc<RwLock<HashMap<SavedQueryId, SavedQuery>>>,
}

impl InMemorySavedQueryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, query: SavedQuery) {
        self.queries.write().await.insert(query.id.clone(), query);
    }
}

#[async_trait]
impl SavedQueryRepository for InMemorySavedQueryRepository {
    async fn find_by_id(&self, id: &SavedQueryId) -> Result<Option<SavedQuery>, DomainError> {
        Ok(self.queries.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        previous_id: &SavedQueryId,
        query: &SavedQuery,
    ) -> Result<(), DomainError> {
        let mut queries = self.queries.write().await;
        if queries.remove(previous_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::SavedQueryNotFound,
                format!("Saved query not found: {}", previous_id),
            ));
        }
        queries.insert(query.id.clone(), query.clone());
        Ok(())
    }
}

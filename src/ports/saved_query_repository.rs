//! Saved query repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SavedQueryId};
use crate::domain::saved_query::SavedQuery;

#[async_trait]
pub trait SavedQueryRepository: Send + Sync {
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SavedQueryId) -> Result<Option<SavedQuery>, DomainError>;

    /// Stores `query` under `previous_id`, which differs from `query.id` when
    /// the update renamed it.
    ///
    /// # Errors
    ///
    /// - `SavedQueryNotFound` if `previous_id` doesn't exist
    async fn update(
        &self,
        previous_id: &SavedQueryId,
        query: &SavedQuery,
    ) -> Result<(), DomainError>;
}

//! UpdateSavedQueryHandler - Command handler for editing an osquery saved query.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::foundation::{DomainError, SavedQueryId};
use crate::domain::saved_query::{SavedQuery, SavedQueryPatch};
use crate::ports::SavedQueryRepository;

/// Command to update a saved query.
#[derive(Debug, Clone)]
pub struct UpdateSavedQueryCommand {
    pub id: SavedQueryId,
    pub patch: SavedQueryPatch,
    /// Username recorded as the last editor.
    pub updated_by: Option<String>,
}

/// Errors that can occur when updating a saved query.
#[derive(Debug, Clone, Error)]
pub enum UpdateSavedQueryError {
    #[error("Saved query {0} not found")]
    NotFound(SavedQueryId),

    #[error("Prebuilt saved query {0} cannot be updated")]
    Prebuilt(SavedQueryId),

    #[error("Saved query with id \"{0}\" already exists")]
    IdConflict(SavedQueryId),

    #[error(transparent)]
    Repository(#[from] DomainError),
}

/// Handler for updating saved queries.
pub struct UpdateSavedQueryHandler {
    repository: Arc<dyn SavedQueryRepository>,
}

impl UpdateSavedQueryHandler {
    pub fn new(repository: Arc<dyn SavedQueryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSavedQueryCommand,
    ) -> Result<SavedQuery, UpdateSavedQueryError> {
        let mut saved_query = self
            .repository
            .find_by_id(&cmd.id)
            .await?
            .ok_or_else(|| UpdateSavedQueryError::NotFound(cmd.id.clone()))?;

        if saved_query.is_prebuilt() {
            return Err(UpdateSavedQueryError::Prebuilt(cmd.id));
        }

        if let Some(new_id) = cmd.patch.id.as_ref().filter(|new_id| **new_id != cmd.id) {
            if self.repository.find_by_id(new_id).await?.is_some() {
                return Err(UpdateSavedQueryError::IdConflict(new_id.clone()));
            }
        }

        saved_query.apply(cmd.patch);
        saved_query.updated_by = cmd.updated_by;

        self.repository.update(&cmd.id, &saved_query).await?;

        info!(saved_query_id = %saved_query.id, previous_id = %cmd.id, "Saved query updated");
        Ok(saved_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySavedQueryRepository;
    use crate::domain::foundation::Timestamp;
    use chrono::{TimeZone, Utc};

    fn id(s: &str) -> SavedQueryId {
        SavedQueryId::new(s).unwrap()
    }

    async fn repo_with(queries: Vec<SavedQuery>) -> InMemorySavedQueryRepository {
        let repo = InMemorySavedQueryRepository::new();
        for q in queries {
            repo.insert(q).await;
        }
        repo
    }

    fn command(target: &str, patch: SavedQueryPatch) -> UpdateSavedQueryCommand {
        UpdateSavedQueryCommand {
            id: id(target),
            patch,
            updated_by: Some("elastic".into()),
        }
    }

    #[tokio::test]
    async fn updates_fields_and_editor() {
        let mut original = SavedQuery::new(id("uptime"), "select * from uptime;");
        original.updated_at = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        original.platform = Some("linux".into());
        let repo = repo_with(vec![original.clone()]).await;
        let handler = UpdateSavedQueryHandler::new(Arc::new(repo.clone()));

        let updated = handler
            .handle(command(
                "uptime",
                SavedQueryPatch {
                    interval: Some(3600),
                    description: Some("Host uptime".into()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_eq!(updated.interval, Some(3600));
        assert_eq!(updated.description.as_deref(), Some("Host uptime"));
        assert_eq!(updated.platform.as_deref(), Some("linux"));
        assert_eq!(updated.updated_by.as_deref(), Some("elastic"));
        assert!(original.updated_at.is_before(&updated.updated_at));

        let stored = repo.find_by_id(&id("uptime")).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn rename_moves_query() {
        let repo = repo_with(vec![SavedQuery::new(id("old"), "select 1;")]).await;
        let handler = UpdateSavedQueryHandler::new(Arc::new(repo.clone()));

        let updated = handler
            .handle(command(
                "old",
                SavedQueryPatch {
                    id: Some(id("new")),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_eq!(updated.id, id("new"));
        assert!(repo.find_by_id(&id("old")).await.unwrap().is_none());
        assert!(repo.find_by_id(&id("new")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn missing_query_is_not_found() {
        let handler = UpdateSavedQueryHandler::new(Arc::new(InMemorySavedQueryRepository::new()));

        let err = handler
            .handle(command("ghost", SavedQueryPatch::default()))
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateSavedQueryError::NotFound(ref missing) if *missing == id("ghost")));
    }

    #[tokio::test]
    async fn prebuilt_query_is_rejected() {
        let mut prebuilt = SavedQuery::new(id("builtin"), "select 1;");
        prebuilt.prebuilt = Some(true);
        let repo = repo_with(vec![prebuilt]).await;
        let handler = UpdateSavedQueryHandler::new(Arc::new(repo));

        let err = handler
            .handle(command(
                "builtin",
                SavedQueryPatch {
                    query: Some("select 2;".into()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateSavedQueryError::Prebuilt(_)));
    }

    #[tokio::test]
    async fn rename_onto_existing_id_conflicts() {
        let repo = repo_with(vec![
            SavedQuery::new(id("a"), "select 1;"),
            SavedQuery::new(id("b"), "select 2;"),
        ])
        .await;
        let handler = UpdateSavedQueryHandler::new(Arc::new(repo.clone()));

        let err = handler
            .handle(command(
                "a",
                SavedQueryPatch {
                    id: Some(id("b")),
                    ..Default::default()
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Saved query with id \"b\" already exists");
        assert_eq!(repo.find_by_id(&id("a")).await.unwrap().unwrap().query, "select 1;");
    }

    #[tokio::test]
    async fn keeping_same_id_is_not_a_conflict() {
        let repo = repo_with(vec![SavedQuery::new(id("a"), "select 1;")]).await;
        let handler = UpdateSavedQueryHandler::new(Arc::new(repo));

        let updated = handler
            .handle(command(
                "a",
                SavedQueryPatch {
                    id: Some(id("a")),
                    query: Some("select 3;".into()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_eq!(updated.query, "select 3;");
    }
}

//! Knowledge base port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Index pattern searched when no knowledge base data client is available.
pub const KNOWLEDGE_BASE_INDEX_PATTERN: &str = ".kibana-elastic-ai-assistant-kb";

/// Knowledge base storage used by agent runs.
#[async_trait]
pub trait KnowledgeBaseDataClient: Send + Sync {
    /// Alias of the knowledge base index template.
    fn index_alias(&self) -> String;

    /// Id of the ELSER model used for semantic search.
    async fn elser_model_id(&self) -> Result<String, DomainError>;
}

//! Fixed knowledge base data client.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::KnowledgeBaseDataClient;

/// Knowledge base with a configured alias and ELSER model id.
#[derive(Debug, Clone)]
pub struct StaticKnowledgeBase {
    alias: String,
    elser_model_id: String,
}

impl StaticKnowledgeBase {
    pub fn new(alias: impl Into<String>, elser_model_id: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            elser_model_id: elser_model_id.into(),
        }
    }
}

#[async_trait]
impl KnowledgeBaseDataClient for StaticKnowledgeBase {
    fn index_alias(&self) -> String {
        self.alias.clone()
    }

    async fn elser_model_id(&self) -> Result<String, DomainError> {
        Ok(self.elser_model_id.clone())
    }
}

//! Request and response shapes for the assistant routes.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::Replacements;
use crate::domain::foundation::ConversationId;
use crate::ports::{RequestSchema, SchemaValidationError, SubAction};

/// Body of `POST .../actions/connector/{connector_id}/_execute`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteConnectorRequestBody {
    pub conversation_id: Option<String>,
    pub message: Option<String>,
    pub model: Option<String>,
    pub sub_action: SubAction,
    pub action_type_id: String,
    pub alerts_index_pattern: Option<String>,
    pub is_enabled_knowledge_base: bool,
    #[serde(rename = "isEnabledRAGAlerts")]
    pub is_enabled_rag_alerts: Option<bool>,
    #[serde(default)]
    pub replacements: Replacements,
    pub size: Option<u32>,
    pub lang_smith_project: Option<String>,
    pub lang_smith_api_key: Option<SecretString>,
    pub prompt_id: Option<String>,
    pub response_language: Option<String>,
}

impl ExecuteConnectorRequestBody {
    /// The conversation id, already checked by [`RequestSchema::validate`].
    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.conversation_id
            .as_deref()
            .and_then(|id| id.parse().ok())
    }
}

impl RequestSchema for ExecuteConnectorRequestBody {
    fn validate(&self) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();

        if self.action_type_id.trim().is_empty() {
            errors.push(SchemaValidationError::InvalidFormat {
                field: "actionTypeId".into(),
                format: "non-empty string".into(),
            });
        }
        if let Some(id) = &self.conversation_id {
            if id.parse::<ConversationId>().is_err() {
                errors.push(SchemaValidationError::InvalidFormat {
                    field: "conversationId".into(),
                    format: "UUID".into(),
                });
            }
        }
        if self.size == Some(0) {
            errors.push(SchemaValidationError::OutOfRange {
                field: "size".into(),
                value: "0".into(),
                min: "1".into(),
                max: u32::MAX.to_string(),
            });
        }

        SchemaValidationError::from_errors(errors)
    }
}

/// Body of `GET /internal/elastic_assistant/evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub agent_executors: Vec<String>,
}

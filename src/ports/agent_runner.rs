//! Agent runner port.
//!
//! When the knowledge base or RAG alerts are enabled the execute route hands
//! the turn to an agent instead of calling the connector directly. Two agents
//! exist (the agent executor and the assistant graph); both take the same
//! parameters.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::capabilities::AssistantTool;
use crate::domain::conversation::{Replacements, TraceData};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};

use super::actions_client::{ActionError, ConnectorMessage};

/// LLM family behind an action type id, as agents name it.
pub fn llm_type(action_type_id: &str) -> Option<&'static str> {
    match action_type_id {
        ".gen-ai" => Some("openai"),
        ".bedrock" => Some("bedrock"),
        ".gemini" => Some("gemini"),
        _ => None,
    }
}

/// Tracing settings forwarded to the agent.
#[derive(Debug, Clone, Default)]
pub struct TraceOptions {
    pub project_name: Option<String>,
    pub api_key: Option<SecretString>,
}

impl TraceOptions {
    pub fn is_enabled(&self) -> bool {
        self.project_name.is_some() && self.api_key.is_some()
    }
}

/// Everything an agent run needs.
#[derive(Debug, Clone)]
pub struct AgentExecutorParams {
    pub connector_id: String,
    pub action_type_id: String,
    pub llm_type: Option<&'static str>,
    pub model: Option<String>,
    pub conversation_id: Option<ConversationId>,
    pub messages: Vec<ConnectorMessage>,
    pub replacements: Replacements,
    pub alerts_index_pattern: Option<String>,
    pub size: Option<u32>,
    pub is_enabled_knowledge_base: bool,
    pub is_stream: bool,
    pub assistant_tools: Vec<AssistantTool>,
    /// Index the knowledge base store searches.
    pub kb_index: String,
    pub elser_id: Option<String>,
    pub response_language: Option<String>,
    pub trace_options: TraceOptions,
    pub cancellation: CancellationToken,
}

/// What an agent run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentResponse {
    pub data: String,
    pub trace_data: Option<TraceData>,
    /// Anonymization replacements created during the run.
    pub replacements: Replacements,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent run was cancelled")]
    Cancelled,

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("agent failed: {0}")]
    Failed(String),
}

impl From<AgentError> for DomainError {
    fn from(err: AgentError) -> Self {
        DomainError::new(ErrorCode::ConnectorError, err.to_string())
    }
}

#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, params: AgentExecutorParams) -> Result<AgentResponse, AgentError>;
}

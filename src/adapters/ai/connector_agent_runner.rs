//! Connector-backed agent runner.
//!
//! Runs an agent turn as a single connector call. The registered tools and
//! the knowledge base index are described to the model in a system message
//! ahead of the conversation; tool calls are not executed.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::conversation::MessageRole;
use crate::ports::{
    ActionRequest, ActionsClient, AgentError, AgentExecutorParams, AgentResponse, AgentRunner,
    ConnectorMessage, SubAction,
};

/// Which agent this runner stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentFlavor {
    AgentExecutor,
    AssistantGraph,
}

impl AgentFlavor {
    pub const ALL: [AgentFlavor; 2] = [AgentFlavor::AgentExecutor, AgentFlavor::AssistantGraph];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentFlavor::AgentExecutor => "agent_executor",
            AgentFlavor::AssistantGraph => "assistant_graph",
        }
    }
}

pub struct ConnectorAgentRunner {
    actions: Arc<dyn ActionsClient>,
    flavor: AgentFlavor,
}

impl ConnectorAgentRunner {
    pub fn new(actions: Arc<dyn ActionsClient>, flavor: AgentFlavor) -> Self {
        Self { actions, flavor }
    }

    fn system_message(params: &AgentExecutorParams) -> ConnectorMessage {
        let mut content = String::from("You are a helpful, expert assistant who answers questions about Elastic Security.");
        if !params.assistant_tools.is_empty() {
            let names: Vec<&str> = params
                .assistant_tools
                .iter()
                .map(|t| t.name.as_str())
                .collect();
            content.push_str(&format!(" Available tools: {}.", names.join(", ")));
        }
        if params.is_enabled_knowledge_base {
            content.push_str(&format!(" Knowledge base index: {}.", params.kb_index));
        }
        if let Some(pattern) = &params.alerts_index_pattern {
            content.push_str(&format!(" Alerts index pattern: {}.", pattern));
        }
        if let Some(language) = &params.response_language {
            content.push_str(&format!(" Respond in {}.", language));
        }
        ConnectorMessage::new(MessageRole::System, content)
    }
}

#[async_trait]
impl AgentRunner for ConnectorAgentRunner {
    async fn run(&self, params: AgentExecutorParams) -> Result<AgentResponse, AgentError> {
        debug!(
            agent = self.flavor.as_str(),
            connector_id = %params.connector_id,
            tools = params.assistant_tools.len(),
            kb_index = %params.kb_index,
            "Running agent"
        );

        let sub_action = if params.is_stream {
            SubAction::InvokeStream
        } else {
            SubAction::InvokeAi
        };
        let request = ActionRequest::new(&params.connector_id, &params.action_type_id, sub_action)
            .with_model(params.model.clone())
            .with_message(Self::system_message(&params))
            .with_messages(params.messages.iter().cloned())
            .with_cancellation(params.cancellation.clone());

        let result = self.actions.execute(request).await?;
        if !result.is_ok() {
            return Err(AgentError::Failed(
                result
                    .message
                    .unwrap_or_else(|| "connector returned an error".to_string()),
            ));
        }

        Ok(AgentResponse {
            data: result.data.unwrap_or_default(),
            trace_data: result.trace_data,
            replacements: Default::default(),
        })
    }
}

//! ExecuteAssistant command handler.
//!
//! Runs one chat turn against a connector. The turn is recorded on the
//! conversation (when one is given), sent either straight to the connector or
//! through an agent, and the answer is appended back.

use secrecy::SecretString;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::domain::capabilities::conversational_tools;
use crate::domain::conversation::{NewMessage, Replacements, TraceData};
use crate::domain::foundation::{AuthenticatedUser, ConversationId};
use crate::ports::{
    llm_type, ActionRequest, ActionStatus, ActionsClient, AgentExecutorParams, AgentRunner,
    CapabilityRegistry, ConnectorMessage, ConversationsDataClient, InvokeAssistantProperties,
    KnowledgeBaseDataClient, LicensingService, SubAction, TelemetryEvent, TelemetryReporter,
    TraceOptions, GEN_AI_ACTION_TYPE_ID, KNOWLEDGE_BASE_INDEX_PATTERN,
};

use super::checks::{perform_checks, CheckContext, CheckFailure, RequiredChecks};
use super::title::ConnectorTarget;
use super::workflow::{AssistantReply, ConversationWorkflow, UpdateConversationError, UserInput};

/// How a turn reaches the LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Straight to the connector.
    Direct,
    AgentExecutor,
    AssistantGraph,
}

impl ExecutionStrategy {
    /// Picks the strategy for a turn.
    ///
    /// The assistant graph is used only when the plugin has knowledge base by
    /// default turned on and the request enables the knowledge base.
    pub fn resolve(
        is_enabled_knowledge_base: bool,
        is_enabled_rag_alerts: bool,
        knowledge_base_by_default: bool,
    ) -> Self {
        if !is_enabled_knowledge_base && !is_enabled_rag_alerts {
            ExecutionStrategy::Direct
        } else if knowledge_base_by_default && is_enabled_knowledge_base {
            ExecutionStrategy::AssistantGraph
        } else {
            ExecutionStrategy::AgentExecutor
        }
    }
}

/// Command to execute one assistant turn.
#[derive(Debug, Clone)]
pub struct ExecuteAssistantCommand {
    pub connector_id: String,
    pub action_type_id: String,
    pub sub_action: SubAction,
    pub model: Option<String>,
    pub conversation_id: Option<ConversationId>,
    pub message: Option<String>,
    pub alerts_index_pattern: Option<String>,
    pub is_enabled_knowledge_base: bool,
    /// Absent means "not specified"; only `Some(true)` enables RAG alerts.
    pub is_enabled_rag_alerts: Option<bool>,
    pub replacements: Replacements,
    pub size: Option<u32>,
    pub lang_smith_project: Option<String>,
    pub lang_smith_api_key: Option<SecretString>,
    pub prompt_id: Option<String>,
    pub response_language: Option<String>,
    /// Plugin the request originates from.
    pub plugin_name: String,
    pub current_user: Option<AuthenticatedUser>,
    pub cancellation: CancellationToken,
}

impl ExecuteAssistantCommand {
    pub fn new(
        connector_id: impl Into<String>,
        action_type_id: impl Into<String>,
        plugin_name: impl Into<String>,
    ) -> Self {
        Self {
            connector_id: connector_id.into(),
            action_type_id: action_type_id.into(),
            sub_action: SubAction::InvokeAi,
            model: None,
            conversation_id: None,
            message: None,
            alerts_index_pattern: None,
            is_enabled_knowledge_base: false,
            is_enabled_rag_alerts: None,
            replacements: Replacements::new(),
            size: None,
            lang_smith_project: None,
            lang_smith_api_key: None,
            prompt_id: None,
            response_language: None,
            plugin_name: plugin_name.into(),
            current_user: None,
            cancellation: CancellationToken::new(),
        }
    }

    fn target(&self) -> ConnectorTarget {
        ConnectorTarget::new(&self.connector_id, &self.action_type_id)
            .with_model(self.model.clone())
    }

    fn rag_alerts_enabled(&self) -> bool {
        self.is_enabled_rag_alerts.unwrap_or(false)
    }
}

/// Result of an assistant turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteAssistantResult {
    pub connector_id: String,
    pub data: String,
    pub status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacements: Option<Replacements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_data: Option<TraceData>,
}

/// Errors that can occur when executing a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteAssistantError {
    #[error("{}", .0.message())]
    Check(CheckFailure),

    #[error(transparent)]
    Conversation(#[from] UpdateConversationError),

    #[error("conversation id: \"{0}\" not updated")]
    ConversationNotUpdated(ConversationId),

    #[error("{0}")]
    Execution(String),
}

/// Handler for assistant turns.
pub struct ExecuteAssistantHandler {
    workflow: ConversationWorkflow,
    actions: Arc<dyn ActionsClient>,
    agent_executor: Arc<dyn AgentRunner>,
    assistant_graph: Arc<dyn AgentRunner>,
    licensing: Arc<dyn LicensingService>,
    capabilities: Arc<dyn CapabilityRegistry>,
    knowledge_base: Option<Arc<dyn KnowledgeBaseDataClient>>,
    telemetry: Arc<dyn TelemetryReporter>,
}

/// Collaborators of [`ExecuteAssistantHandler`].
#[derive(Clone)]
pub struct ExecuteAssistantDeps {
    pub conversations: Arc<dyn ConversationsDataClient>,
    pub actions: Arc<dyn ActionsClient>,
    pub agent_executor: Arc<dyn AgentRunner>,
    pub assistant_graph: Arc<dyn AgentRunner>,
    pub licensing: Arc<dyn LicensingService>,
    pub capabilities: Arc<dyn CapabilityRegistry>,
    pub knowledge_base: Option<Arc<dyn KnowledgeBaseDataClient>>,
    pub telemetry: Arc<dyn TelemetryReporter>,
}

/// What the LLM produced, before it is recorded.
struct LlmOutput {
    data: String,
    status: ActionStatus,
    trace_data: Option<TraceData>,
    new_replacements: Replacements,
    streaming: bool,
}

impl ExecuteAssistantHandler {
    pub fn new(deps: ExecuteAssistantDeps) -> Self {
        Self {
            workflow: ConversationWorkflow::new(deps.conversations, deps.actions.clone()),
            actions: deps.actions,
            agent_executor: deps.agent_executor,
            assistant_graph: deps.assistant_graph,
            licensing: deps.licensing,
            capabilities: deps.capabilities,
            knowledge_base: deps.knowledge_base,
            telemetry: deps.telemetry,
        }
    }

    pub async fn handle(
        &self,
        cmd: ExecuteAssistantCommand,
    ) -> Result<ExecuteAssistantResult, ExecuteAssistantError> {
        let ctx = CheckContext {
            license: self.licensing.current_license(),
            current_user: cmd.current_user.as_ref(),
            plugin_name: &cmd.plugin_name,
            capabilities: self.capabilities.as_ref(),
        };
        if let Some(failure) = perform_checks(RequiredChecks::new().license().authenticated_user(), &ctx) {
            return Err(ExecuteAssistantError::Check(failure));
        }

        match self.run_turn(&cmd).await {
            Ok(result) => Ok(result),
            Err(err) => {
                self.record_failure(&cmd, &err).await;
                Err(err)
            }
        }
    }

    async fn run_turn(
        &self,
        cmd: &ExecuteAssistantCommand,
    ) -> Result<ExecuteAssistantResult, ExecuteAssistantError> {
        let messages = self.messages_for_llm(cmd).await?;

        let features = self.capabilities.registered_features(&cmd.plugin_name);
        let strategy = ExecutionStrategy::resolve(
            cmd.is_enabled_knowledge_base,
            cmd.rag_alerts_enabled(),
            features.knowledge_base_by_default,
        );
        debug!(?strategy, connector_id = %cmd.connector_id, "Executing assistant turn");

        let output = match strategy {
            ExecutionStrategy::Direct => self.execute_direct(cmd, messages).await?,
            ExecutionStrategy::AgentExecutor | ExecutionStrategy::AssistantGraph => {
                self.execute_agent(cmd, messages, strategy, features.knowledge_base_by_default)
                    .await?
            }
        };

        let mut latest_replacements = cmd.replacements.clone();
        latest_replacements.merge(&output.new_replacements);

        if let Some(conversation_id) = cmd.conversation_id {
            self.workflow
                .append_assistant_message_to_conversation(
                    conversation_id,
                    AssistantReply {
                        content: output.data.clone(),
                        replacements: latest_replacements.clone(),
                        is_error: output.status == ActionStatus::Error,
                        trace_data: output.trace_data.clone(),
                    },
                )
                .await?;
        }

        self.telemetry.report_event(TelemetryEvent::InvokeAssistantSuccess(
            self.telemetry_properties(cmd, strategy, output.streaming, None),
        ));

        let is_agent = strategy != ExecutionStrategy::Direct;
        Ok(ExecuteAssistantResult {
            connector_id: cmd.connector_id.clone(),
            data: output.data,
            status: output.status,
            replacements: is_agent.then_some(latest_replacements),
            trace_data: output.trace_data,
        })
    }

    /// Messages the LLM sees: the whole conversation when one was updated,
    /// otherwise just the request message.
    async fn messages_for_llm(
        &self,
        cmd: &ExecuteAssistantCommand,
    ) -> Result<Vec<ConnectorMessage>, ExecuteAssistantError> {
        let new_message = cmd.message.as_ref().map(NewMessage::user);

        if let (Some(conversation_id), Some(message)) = (cmd.conversation_id, &new_message) {
            let mut input = UserInput::new(cmd.target())
                .with_conversation_id(conversation_id)
                .with_messages(vec![message.clone()])
                .with_replacements(cmd.replacements.clone());
            input.response_language = cmd.response_language.clone();
            input.prompt_id = cmd.prompt_id.clone();
            input.created_by = cmd.current_user.as_ref().map(|u| u.id.clone());
            input.cancellation = cmd.cancellation.clone();

            let updated = self
                .workflow
                .update_conversation_with_user_input(conversation_id, input)
                .await?
                .ok_or(ExecuteAssistantError::ConversationNotUpdated(conversation_id))?;

            return Ok(updated
                .messages
                .iter()
                .map(|m| ConnectorMessage::new(m.role, m.content.clone()))
                .collect());
        }

        Ok(new_message
            .into_iter()
            .map(|m| ConnectorMessage::new(m.role_or_default(), m.content))
            .collect())
    }

    async fn execute_direct(
        &self,
        cmd: &ExecuteAssistantCommand,
        messages: Vec<ConnectorMessage>,
    ) -> Result<LlmOutput, ExecuteAssistantError> {
        debug!("Executing via actions framework directly");
        let request = ActionRequest::new(&cmd.connector_id, &cmd.action_type_id, cmd.sub_action)
            .with_model(cmd.model.clone())
            .with_messages(messages)
            .with_cancellation(cmd.cancellation.clone());

        let result = self
            .actions
            .execute(request)
            .await
            .map_err(|e| ExecuteAssistantError::Execution(e.to_string()))?;

        if !result.is_ok() {
            return Err(ExecuteAssistantError::Execution(
                result
                    .message
                    .unwrap_or_else(|| "Action result status is error".to_string()),
            ));
        }

        Ok(LlmOutput {
            data: result.data.unwrap_or_default(),
            status: result.status,
            trace_data: result.trace_data,
            new_replacements: Replacements::new(),
            streaming: cmd.sub_action.is_stream(),
        })
    }

    async fn execute_agent(
        &self,
        cmd: &ExecuteAssistantCommand,
        messages: Vec<ConnectorMessage>,
        strategy: ExecutionStrategy,
        knowledge_base_by_default: bool,
    ) -> Result<LlmOutput, ExecuteAssistantError> {
        debug!(
            is_enabled_knowledge_base = cmd.is_enabled_knowledge_base,
            is_enabled_rag_alerts = cmd.rag_alerts_enabled(),
            "Executing via agent"
        );

        let kb_client = self
            .knowledge_base
            .as_ref()
            .filter(|_| knowledge_base_by_default);
        let kb_index = kb_client
            .map(|kb| kb.index_alias())
            .unwrap_or_else(|| KNOWLEDGE_BASE_INDEX_PATTERN.to_string());
        let elser_id = match &self.knowledge_base {
            Some(kb) => Some(
                kb.elser_model_id()
                    .await
                    .map_err(|e| ExecuteAssistantError::Execution(e.to_string()))?,
            ),
            None => None,
        };

        let is_stream = cmd.sub_action.is_stream();
        let params = AgentExecutorParams {
            connector_id: cmd.connector_id.clone(),
            action_type_id: cmd.action_type_id.clone(),
            llm_type: llm_type(&cmd.action_type_id),
            model: cmd.model.clone(),
            conversation_id: cmd.conversation_id,
            messages,
            replacements: cmd.replacements.clone(),
            alerts_index_pattern: cmd.alerts_index_pattern.clone(),
            size: cmd.size,
            is_enabled_knowledge_base: cmd.is_enabled_knowledge_base,
            is_stream,
            assistant_tools: conversational_tools(
                self.capabilities.registered_tools(&cmd.plugin_name),
            ),
            kb_index,
            elser_id,
            response_language: cmd.response_language.clone(),
            trace_options: TraceOptions {
                project_name: cmd.lang_smith_project.clone(),
                api_key: cmd.lang_smith_api_key.clone(),
            },
            cancellation: cmd.cancellation.clone(),
        };

        let runner = match strategy {
            ExecutionStrategy::AssistantGraph => &self.assistant_graph,
            _ => &self.agent_executor,
        };
        let response = runner
            .run(params)
            .await
            .map_err(|e| ExecuteAssistantError::Execution(e.to_string()))?;

        Ok(LlmOutput {
            data: response.data,
            status: ActionStatus::Ok,
            trace_data: response.trace_data,
            new_replacements: response.replacements,
            streaming: is_stream && cmd.action_type_id == GEN_AI_ACTION_TYPE_ID,
        })
    }

    /// Records a failed turn on the conversation and in telemetry.
    async fn record_failure(&self, cmd: &ExecuteAssistantCommand, err: &ExecuteAssistantError) {
        error!(error = %err, connector_id = %cmd.connector_id, "Assistant turn failed");

        if let Some(conversation_id) = cmd.conversation_id {
            let reply = AssistantReply {
                content: err.to_string(),
                replacements: cmd.replacements.clone(),
                is_error: true,
                trace_data: None,
            };
            if let Err(append_err) = self
                .workflow
                .append_assistant_message_to_conversation(conversation_id, reply)
                .await
            {
                error!(error = %append_err, "Failed to record error message on conversation");
            }
        }

        let strategy = ExecutionStrategy::resolve(
            cmd.is_enabled_knowledge_base,
            cmd.rag_alerts_enabled(),
            self.capabilities
                .registered_features(&cmd.plugin_name)
                .knowledge_base_by_default,
        );
        let streaming = cmd.sub_action.is_stream();
        self.telemetry.report_event(TelemetryEvent::InvokeAssistantError(
            self.telemetry_properties(cmd, strategy, streaming, Some(err.to_string())),
        ));
    }

    fn telemetry_properties(
        &self,
        cmd: &ExecuteAssistantCommand,
        strategy: ExecutionStrategy,
        streaming: bool,
        error_message: Option<String>,
    ) -> InvokeAssistantProperties {
        // Agent runs count RAG alerts as on unless the request said otherwise.
        let is_enabled_rag_alerts = match strategy {
            ExecutionStrategy::Direct => cmd.rag_alerts_enabled(),
            _ => cmd.is_enabled_rag_alerts.unwrap_or(true),
        };
        InvokeAssistantProperties {
            action_type_id: cmd.action_type_id.clone(),
            is_enabled_knowledge_base: cmd.is_enabled_knowledge_base,
            is_enabled_rag_alerts,
            model: cmd.model.clone(),
            assistant_streaming_enabled: streaming,
            error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockActionsClient, MockAgentRunner};
    use crate::adapters::memory::{InMemoryConversationsDataClient, StaticKnowledgeBase};
    use crate::adapters::platform::{
        RecordingTelemetryReporter, StaticCapabilityRegistry, StaticLicensingService,
    };
    use crate::domain::capabilities::{
        AssistantFeatureKey, AssistantFeatures, AssistantTool, ATTACK_DISCOVERY_TOOL_ID,
        DEFAULT_PLUGIN_NAME,
    };
    use crate::domain::conversation::{
        Conversation, Message, MessageRole, NewConversation, NEW_CHAT,
    };
    use crate::domain::foundation::UserId;
    use crate::domain::licensing::{License, LicenseType, UPGRADE_LICENSE_MESSAGE};
    use crate::ports::{ActionError, AgentError, AgentResponse};

    struct Fixture {
        handler: ExecuteAssistantHandler,
        store: InMemoryConversationsDataClient,
        actions: MockActionsClient,
        agent_executor: MockAgentRunner,
        assistant_graph: MockAgentRunner,
        telemetry: RecordingTelemetryReporter,
    }

    fn fixture(actions: MockActionsClient, features: AssistantFeatures, license: LicenseType) -> Fixture {
        let store = InMemoryConversationsDataClient::new();
        let agent_executor = MockAgentRunner::new();
        let assistant_graph = MockAgentRunner::new();
        let telemetry = RecordingTelemetryReporter::new();
        let registry = StaticCapabilityRegistry::new()
            .with_features(DEFAULT_PLUGIN_NAME, features)
            .with_tools(
                DEFAULT_PLUGIN_NAME,
                vec![
                    AssistantTool::new("alert-counts-tool", "AlertCountsTool", "counts"),
                    AssistantTool::new(ATTACK_DISCOVERY_TOOL_ID, "AttackDiscoveryTool", "ad"),
                ],
            );

        let handler = ExecuteAssistantHandler::new(ExecuteAssistantDeps {
            conversations: Arc::new(store.clone()),
            actions: Arc::new(actions.clone()),
            agent_executor: Arc::new(agent_executor.clone()),
            assistant_graph: Arc::new(assistant_graph.clone()),
            licensing: Arc::new(StaticLicensingService::new(License::active(license))),
            capabilities: Arc::new(registry),
            knowledge_base: Some(Arc::new(StaticKnowledgeBase::new("kb-alias", ".elser_model_2"))),
            telemetry: Arc::new(telemetry.clone()),
        });

        Fixture {
            handler,
            store,
            actions,
            agent_executor,
            assistant_graph,
            telemetry,
        }
    }

    fn default_fixture(actions: MockActionsClient) -> Fixture {
        fixture(actions, AssistantFeatures::default(), LicenseType::Enterprise)
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("elastic").unwrap(), "elastic")
    }

    fn command() -> ExecuteAssistantCommand {
        let mut cmd = ExecuteAssistantCommand::new("connector-1", ".gen-ai", DEFAULT_PLUGIN_NAME);
        cmd.message = Some("What is this alert?".into());
        cmd.current_user = Some(user());
        cmd
    }

    async fn seed(store: &InMemoryConversationsDataClient, title: &str) -> Conversation {
        let conversation = Conversation::create(
            ConversationId::new(),
            NewConversation {
                title: title.into(),
                messages: vec![Message::user("earlier")],
                replacements: Replacements::new(),
                api_config: None,
                created_by: None,
            },
        );
        store.insert(conversation.clone()).await;
        conversation
    }

    #[test]
    fn strategy_resolution() {
        use ExecutionStrategy::*;
        assert_eq!(ExecutionStrategy::resolve(false, false, false), Direct);
        assert_eq!(ExecutionStrategy::resolve(false, false, true), Direct);
        assert_eq!(ExecutionStrategy::resolve(true, false, false), AgentExecutor);
        assert_eq!(ExecutionStrategy::resolve(false, true, false), AgentExecutor);
        assert_eq!(ExecutionStrategy::resolve(false, true, true), AgentExecutor);
        assert_eq!(ExecutionStrategy::resolve(true, false, true), AssistantGraph);
        assert_eq!(ExecutionStrategy::resolve(true, true, true), AssistantGraph);
    }

    #[tokio::test]
    async fn insufficient_license_is_rejected_before_any_call() {
        let f = fixture(MockActionsClient::new(), AssistantFeatures::default(), LicenseType::Platinum);

        let err = f.handler.handle(command()).await.unwrap_err();
        assert_eq!(err, ExecuteAssistantError::Check(CheckFailure::LicenseInsufficient));
        assert_eq!(err.to_string(), UPGRADE_LICENSE_MESSAGE);
        assert_eq!(f.actions.call_count(), 0);
        assert!(f.telemetry.events().is_empty());
    }

    #[tokio::test]
    async fn missing_user_is_rejected() {
        let f = default_fixture(MockActionsClient::new());
        let mut cmd = command();
        cmd.current_user = None;

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err, ExecuteAssistantError::Check(CheckFailure::Unauthenticated));
    }

    #[tokio::test]
    async fn direct_turn_calls_connector_with_request_message() {
        let f = default_fixture(MockActionsClient::new().with_response("It is benign."));

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.data, "It is benign.");
        assert_eq!(result.status, ActionStatus::Ok);
        assert_eq!(result.connector_id, "connector-1");
        assert!(result.replacements.is_none());

        let calls = f.actions.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages.len(), 1);
        assert_eq!(calls[0].messages[0].content, "What is this alert?");
        assert_eq!(f.agent_executor.call_count(), 0);

        let events = f.telemetry.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "invoke_assistant_success");
        assert!(!events[0].properties().assistant_streaming_enabled);
    }

    #[tokio::test]
    async fn turn_on_conversation_records_user_and_assistant_messages() {
        let actions = MockActionsClient::new()
            .with_response("Alert triage")
            .with_response("Here is the answer");
        let f = default_fixture(actions);
        let conversation = seed(&f.store, NEW_CHAT).await;

        let mut cmd = command();
        cmd.conversation_id = Some(conversation.id);
        let result = f.handler.handle(cmd).await.unwrap();
        assert_eq!(result.data, "Here is the answer");

        // title + turn
        let calls = f.actions.get_calls();
        assert_eq!(calls.len(), 2);
        let turn_contents: Vec<_> = calls[1].messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(turn_contents, vec!["earlier", "What is this alert?"]);

        let stored = f.store.get_conversation(&conversation.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Alert triage");
        assert_eq!(stored.messages.len(), 3);
        assert_eq!(stored.messages[2].role, MessageRole::Assistant);
        assert_eq!(stored.messages[2].content, "Here is the answer");
    }

    #[tokio::test]
    async fn missing_conversation_fails_with_not_found() {
        let f = default_fixture(MockActionsClient::new());
        let id = ConversationId::new();
        let mut cmd = command();
        cmd.conversation_id = Some(id);

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.to_string(), format!("conversation id: \"{}\" not found", id));

        let events = f.telemetry.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "invoke_assistant_error");
    }

    #[tokio::test]
    async fn connector_failure_appends_error_message() {
        let actions = MockActionsClient::new().with_error(ActionError::Network("reset".into()));
        let f = default_fixture(actions);
        let conversation = seed(&f.store, "Named").await;

        let mut cmd = command();
        cmd.conversation_id = Some(conversation.id);
        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, ExecuteAssistantError::Execution(_)));

        let stored = f.store.get_conversation(&conversation.id).await.unwrap().unwrap();
        let last = stored.messages.last().unwrap();
        assert!(last.is_error());
        assert_eq!(last.content, "network error: reset");

        let events = f.telemetry.events();
        assert_eq!(events[0].event_type(), "invoke_assistant_error");
        assert_eq!(
            events[0].properties().error_message.as_deref(),
            Some("network error: reset")
        );
    }

    #[tokio::test]
    async fn knowledge_base_uses_agent_executor_without_kb_by_default() {
        let f = default_fixture(MockActionsClient::new());
        let mut cmd = command();
        cmd.is_enabled_knowledge_base = true;

        f.handler.handle(cmd).await.unwrap();

        assert_eq!(f.agent_executor.call_count(), 1);
        assert_eq!(f.assistant_graph.call_count(), 0);
        assert_eq!(f.actions.call_count(), 0);

        let params = &f.agent_executor.get_calls()[0];
        assert_eq!(params.kb_index, KNOWLEDGE_BASE_INDEX_PATTERN);
        assert_eq!(params.llm_type, Some("openai"));
        assert_eq!(params.elser_id.as_deref(), Some(".elser_model_2"));
        assert!(params
            .assistant_tools
            .iter()
            .all(|t| t.id != ATTACK_DISCOVERY_TOOL_ID));
        assert_eq!(params.assistant_tools.len(), 1);
    }

    #[tokio::test]
    async fn kb_by_default_routes_to_assistant_graph_with_alias() {
        let features = AssistantFeatures::default().with(AssistantFeatureKey::KnowledgeBaseByDefault, true);
        let f = fixture(MockActionsClient::new(), features, LicenseType::Enterprise);
        let mut cmd = command();
        cmd.is_enabled_knowledge_base = true;

        f.handler.handle(cmd).await.unwrap();

        assert_eq!(f.assistant_graph.call_count(), 1);
        assert_eq!(f.agent_executor.call_count(), 0);
        assert_eq!(f.assistant_graph.get_calls()[0].kb_index, "kb-alias");
    }

    #[tokio::test]
    async fn rag_only_with_kb_by_default_uses_agent_executor() {
        let features = AssistantFeatures::default().with(AssistantFeatureKey::KnowledgeBaseByDefault, true);
        let f = fixture(MockActionsClient::new(), features, LicenseType::Enterprise);
        let mut cmd = command();
        cmd.is_enabled_rag_alerts = Some(true);

        f.handler.handle(cmd).await.unwrap();

        assert_eq!(f.agent_executor.call_count(), 1);
        assert_eq!(f.agent_executor.get_calls()[0].kb_index, "kb-alias");
    }

    #[tokio::test]
    async fn agent_replacements_are_merged_and_persisted() {
        let f = default_fixture(MockActionsClient::new().with_response("title"));
        let conversation = seed(&f.store, "Named").await;
        f.agent_executor.clone().with_response(AgentResponse {
            data: "Host [H1] is fine".into(),
            trace_data: None,
            replacements: Replacements::new().with("[H1]", "web-01"),
        });

        let mut cmd = command();
        cmd.conversation_id = Some(conversation.id);
        cmd.is_enabled_rag_alerts = Some(true);
        cmd.replacements = Replacements::new().with("[U1]", "alice");

        let result = f.handler.handle(cmd).await.unwrap();
        let replacements = result.replacements.unwrap();
        assert_eq!(replacements.get("[H1]"), Some("web-01"));
        assert_eq!(replacements.get("[U1]"), Some("alice"));

        let stored = f.store.get_conversation(&conversation.id).await.unwrap().unwrap();
        assert_eq!(stored.messages.last().unwrap().content, "Host web-01 is fine");
        assert_eq!(stored.replacements.get("[H1]"), Some("web-01"));
    }

    #[tokio::test]
    async fn agent_failure_reports_error() {
        let f = default_fixture(MockActionsClient::new());
        f.agent_executor
            .clone()
            .with_error(AgentError::Failed("tool crashed".into()));
        let mut cmd = command();
        cmd.is_enabled_knowledge_base = true;

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.to_string(), "agent failed: tool crashed");
        assert_eq!(f.telemetry.events()[0].event_type(), "invoke_assistant_error");
    }

    #[tokio::test]
    async fn agent_telemetry_defaults_rag_alerts_on() {
        let f = default_fixture(MockActionsClient::new());
        let mut cmd = command();
        cmd.is_enabled_knowledge_base = true;
        cmd.sub_action = SubAction::InvokeStream;

        f.handler.handle(cmd).await.unwrap();

        let props = f.telemetry.events()[0].properties().clone();
        assert!(props.is_enabled_rag_alerts);
        assert!(props.assistant_streaming_enabled);
    }

    #[tokio::test]
    async fn streaming_telemetry_is_gen_ai_only_for_agents() {
        let f = default_fixture(MockActionsClient::new());
        let mut cmd = command();
        cmd.action_type_id = ".bedrock".into();
        cmd.is_enabled_knowledge_base = true;
        cmd.sub_action = SubAction::InvokeStream;

        f.handler.handle(cmd).await.unwrap();

        assert!(!f.telemetry.events()[0].properties().assistant_streaming_enabled);
    }
}

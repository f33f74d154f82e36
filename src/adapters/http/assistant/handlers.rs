//! HTTP handlers for the assistant routes.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio_util::sync::CancellationToken;

use crate::adapters::ai::AgentFlavor;
use crate::application::handlers::assistant::RequiredChecks;
use crate::application::handlers::ExecuteAssistantCommand;
use crate::domain::capabilities::{AssistantFeatureKey, AssistantFeatures};
use crate::domain::conversation::Conversation;
use crate::domain::foundation::ConversationId;
use crate::ports::SubAction;

use super::super::error::ApiError;
use super::super::extract::ValidatedJson;
use super::super::middleware::OptionalAuth;
use super::super::state::{AppState, PluginName};
use super::dto::{EvaluateResponse, ExecuteConnectorRequestBody};

/// POST /internal/elastic_assistant/actions/connector/:connector_id/_execute
pub async fn execute_connector(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    PluginName(plugin_name): PluginName,
    Path(connector_id): Path<String>,
    ValidatedJson(body): ValidatedJson<ExecuteConnectorRequestBody>,
) -> Result<Response, ApiError> {
    // Cancels in-flight connector work if the client goes away.
    let cancellation = CancellationToken::new();
    let guard = cancellation.clone().drop_guard();

    let conversation_id = body.conversation_id();
    let cmd = ExecuteAssistantCommand {
        connector_id,
        action_type_id: body.action_type_id,
        sub_action: body.sub_action,
        model: body.model,
        conversation_id,
        message: body.message,
        alerts_index_pattern: body.alerts_index_pattern,
        is_enabled_knowledge_base: body.is_enabled_knowledge_base,
        is_enabled_rag_alerts: body.is_enabled_rag_alerts,
        replacements: body.replacements,
        size: body.size,
        lang_smith_project: body.lang_smith_project,
        lang_smith_api_key: body.lang_smith_api_key,
        prompt_id: body.prompt_id,
        response_language: body.response_language,
        plugin_name,
        current_user: user,
        cancellation,
    };
    let sub_action = cmd.sub_action;

    let result = state.execute_handler().handle(cmd).await;
    guard.disarm();
    let result = result?;

    Ok(match sub_action {
        SubAction::InvokeAi => Json(result).into_response(),
        SubAction::InvokeStream => ([(CONTENT_TYPE, "text/plain; charset=utf-8")], result.data).into_response(),
    })
}

/// GET /api/security_ai_assistant/current_user/conversations/:id
pub async fn read_conversation(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    PluginName(plugin_name): PluginName,
    Path(id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
    state.check(RequiredChecks::new().authenticated_user(), user.as_ref(), &plugin_name)?;

    let conversation_id: ConversationId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid conversation id: {}", id)))?;

    let conversation = state
        .get_conversation_handler()
        .handle(&conversation_id)
        .await?;
    Ok(Json(conversation))
}

/// GET /internal/elastic_assistant/capabilities
pub async fn get_capabilities(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    PluginName(plugin_name): PluginName,
) -> Result<Json<AssistantFeatures>, ApiError> {
    state.check(
        RequiredChecks::new().license().authenticated_user(),
        user.as_ref(),
        &plugin_name,
    )?;
    Ok(Json(state.capabilities.registered_features(&plugin_name)))
}

/// GET /internal/elastic_assistant/evaluate
pub async fn get_evaluate(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    PluginName(plugin_name): PluginName,
) -> Result<Json<EvaluateResponse>, ApiError> {
    state.check(
        RequiredChecks::new()
            .license()
            .authenticated_user()
            .capability(AssistantFeatureKey::ModelEvaluation),
        user.as_ref(),
        &plugin_name,
    )?;
    Ok(Json(EvaluateResponse {
        agent_executors: AgentFlavor::ALL
            .iter()
            .map(|flavor| flavor.as_str().to_string())
            .collect(),
    }))
}

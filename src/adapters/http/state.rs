//! Shared application state for the HTTP routes.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::handlers::assistant::{
    perform_checks, plugin_name_from_header, CheckContext, RequiredChecks, KBN_CONTEXT_HEADER,
};
use crate::application::handlers::{
    DisableEntityDiscoveryHandler, ExecuteAssistantDeps, ExecuteAssistantHandler,
    GetConversationHandler, ListInferenceTableHandler, UpdateSavedQueryHandler,
};
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{
    ActionsClient, AgentRunner, ApiKeyService, CapabilityRegistry, ConversationsDataClient,
    EntityDefinitionManager, EntityDiscoveryKeyStore, InferenceEndpointReader,
    KnowledgeBaseDataClient, LicensingService, SavedQueryRepository, SessionValidator,
    TelemetryReporter,
};

use super::error::ApiError;

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`. Handlers
/// are built on demand from it.
#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<dyn ConversationsDataClient>,
    pub actions: Arc<dyn ActionsClient>,
    pub agent_executor: Arc<dyn AgentRunner>,
    pub assistant_graph: Arc<dyn AgentRunner>,
    pub licensing: Arc<dyn LicensingService>,
    pub capabilities: Arc<dyn CapabilityRegistry>,
    pub knowledge_base: Option<Arc<dyn KnowledgeBaseDataClient>>,
    pub telemetry: Arc<dyn TelemetryReporter>,
    pub saved_queries: Arc<dyn SavedQueryRepository>,
    pub inference: Arc<dyn InferenceEndpointReader>,
    pub entity_key_store: Arc<dyn EntityDiscoveryKeyStore>,
    pub api_keys: Arc<dyn ApiKeyService>,
    pub entity_definitions: Arc<dyn EntityDefinitionManager>,
    pub session_validator: Arc<dyn SessionValidator>,
    /// Plugin assumed when a request carries no usable `x-kbn-context`.
    pub default_plugin_name: String,
}

impl AppState {
    pub fn execute_handler(&self) -> ExecuteAssistantHandler {
        ExecuteAssistantHandler::new(ExecuteAssistantDeps {
            conversations: self.conversations.clone(),
            actions: self.actions.clone(),
            agent_executor: self.agent_executor.clone(),
            assistant_graph: self.assistant_graph.clone(),
            licensing: self.licensing.clone(),
            capabilities: self.capabilities.clone(),
            knowledge_base: self.knowledge_base.clone(),
            telemetry: self.telemetry.clone(),
        })
    }

    pub fn get_conversation_handler(&self) -> GetConversationHandler {
        GetConversationHandler::new(self.conversations.clone())
    }

    pub fn disable_entity_discovery_handler(&self) -> DisableEntityDiscoveryHandler {
        DisableEntityDiscoveryHandler::new(
            self.entity_key_store.clone(),
            self.api_keys.clone(),
            self.entity_definitions.clone(),
        )
    }

    pub fn update_saved_query_handler(&self) -> UpdateSavedQueryHandler {
        UpdateSavedQueryHandler::new(self.saved_queries.clone())
    }

    pub fn list_inference_table_handler(&self) -> ListInferenceTableHandler {
        ListInferenceTableHandler::new(self.inference.clone())
    }

    /// Runs the request guard for a route.
    pub fn check(
        &self,
        checks: RequiredChecks,
        current_user: Option<&AuthenticatedUser>,
        plugin_name: &str,
    ) -> Result<(), ApiError> {
        let ctx = CheckContext {
            license: self.licensing.current_license(),
            current_user,
            plugin_name,
            capabilities: self.capabilities.as_ref(),
        };
        match perform_checks(checks, &ctx) {
            Some(failure) => Err(failure.into()),
            None => Ok(()),
        }
    }
}

/// Name of the plugin a request originates from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginName(pub String);

impl FromRequestParts<AppState> for PluginName {
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 AppState,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let header = parts
                .headers
                .get(KBN_CONTEXT_HEADER)
                .and_then(|v| v.to_str().ok());
            let source = plugin_name_from_header(header, &state.default_plugin_name);
            Ok(PluginName(source.into_name()))
        })
    }
}

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Assistant Ports
//!
//! - `ActionsClient` - Executes LLM connectors
//! - `AgentRunner` - Runs the agent executor or the assistant graph
//! - `ConversationsDataClient` - Conversation storage
//! - `KnowledgeBaseDataClient` - Knowledge base index and ELSER model
//! - `TelemetryReporter` - Event-based telemetry
//!
//! ## Request Guard Ports
//!
//! - `SessionValidator` - Resolves the authenticated user
//! - `LicensingService` - Current deployment license
//! - `CapabilityRegistry` - Per-plugin features and tools
//!
//! ## Other Ports
//!
//! - `EntityDiscoveryKeyStore`, `ApiKeyService`, `EntityDefinitionManager` - Entity manager
//! - `SavedQueryRepository` - Osquery saved queries
//! - `InferenceEndpointReader` - Inference endpoints table
//! - `RequestSchema` - Field-level request validation

mod actions_client;
mod agent_runner;
mod capability_registry;
mod conversations_data_client;
mod entity_discovery;
mod inference_reader;
mod knowledge_base;
mod licensing_service;
mod saved_query_repository;
mod schema_validator;
mod session_validator;
mod telemetry;

pub use actions_client::{
    connector_tuning, ActionError, ActionRequest, ActionResult, ActionStatus, ActionsClient,
    ConnectorMessage, SubAction, GEN_AI_ACTION_TYPE_ID,
};
pub use agent_runner::{
    llm_type, AgentError, AgentExecutorParams, AgentResponse, AgentRunner, TraceOptions,
};
pub use capability_registry::CapabilityRegistry;
pub use conversations_data_client::{ConversationsDataClient, DataClientError};
pub use entity_discovery::{ApiKeyService, EntityDefinitionManager, EntityDiscoveryKeyStore};
pub use inference_reader::InferenceEndpointReader;
pub use knowledge_base::{KnowledgeBaseDataClient, KNOWLEDGE_BASE_INDEX_PATTERN};
pub use licensing_service::LicensingService;
pub use saved_query_repository::SavedQueryRepository;
pub use schema_validator::{RequestSchema, SchemaValidationError};
pub use session_validator::SessionValidator;
pub use telemetry::{
    InvokeAssistantProperties, TelemetryEvent, TelemetryReporter, INVOKE_ASSISTANT_ERROR_EVENT,
    INVOKE_ASSISTANT_SUCCESS_EVENT,
};

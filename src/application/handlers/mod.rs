//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assistant;
pub mod entities;
pub mod inference;
pub mod saved_query;

pub use assistant::{
    ConversationWorkflow, ExecuteAssistantCommand, ExecuteAssistantDeps, ExecuteAssistantError,
    ExecuteAssistantHandler, ExecuteAssistantResult, GetConversationHandler,
};
pub use entities::{
    DisableEntityDiscoveryCommand, DisableEntityDiscoveryError, DisableEntityDiscoveryHandler,
};
pub use inference::{ListInferenceTableHandler, ListInferenceTableQuery};
pub use saved_query::{UpdateSavedQueryCommand, UpdateSavedQueryError, UpdateSavedQueryHandler};

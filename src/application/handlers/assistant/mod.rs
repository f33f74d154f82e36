//! Assistant handlers: chat turns, conversation bookkeeping and route guards.

mod checks;
mod execute;
mod get_conversation;
mod plugin_name;
mod title;
mod workflow;

pub use checks::{perform_checks, CheckContext, CheckFailure, RequiredChecks};
pub use execute::{
    ExecuteAssistantCommand, ExecuteAssistantDeps, ExecuteAssistantError,
    ExecuteAssistantHandler, ExecuteAssistantResult, ExecutionStrategy,
};
pub use get_conversation::GetConversationHandler;
pub use plugin_name::{plugin_name_from_header, PluginNameSource, KBN_CONTEXT_HEADER};
pub use title::{generate_title_for_new_chat, ConnectorTarget, TitleOutcome};
pub use workflow::{AssistantReply, ConversationWorkflow, UpdateConversationError, UserInput};

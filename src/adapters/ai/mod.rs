//! LLM adapters.
//!
//! ## Available Adapters
//!
//! - `HttpActionsClient` - Executes connectors through the actions HTTP API
//! - `MockActionsClient` - Configurable mock for testing
//! - `ConnectorAgentRunner` - Agent runner backed by a single connector call
//! - `MockAgentRunner` - Configurable mock for testing
//! - `UnconfiguredActionsClient` - Stand-in when no actions API is configured

mod connector_agent_runner;
mod http_actions_client;
mod mock_actions_client;
mod mock_agent_runner;
mod unconfigured_actions_client;

pub use connector_agent_runner::{AgentFlavor, ConnectorAgentRunner};
pub use http_actions_client::{HttpActionsClient, HttpActionsConfig};
pub use mock_actions_client::{MockActionResponse, MockActionsClient};
pub use mock_agent_runner::MockAgentRunner;
pub use unconfigured_actions_client::UnconfiguredActionsClient;

//! Actions connector port.
//!
//! Every LLM call made by the assistant goes through a connector: the title
//! generator, and the execute route when no agent is involved. The connector
//! is addressed by id and typed by its action type (`.gen-ai`, `.bedrock`, ...).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::conversation::{MessageRole, TraceData};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Action type id of the OpenAI-compatible connector.
pub const GEN_AI_ACTION_TYPE_ID: &str = ".gen-ai";

/// Which connector operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubAction {
    /// Single response, returned whole.
    #[default]
    #[serde(rename = "invokeAI")]
    InvokeAi,
    /// Streamed response.
    #[serde(rename = "invokeStream")]
    InvokeStream,
}

impl SubAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubAction::InvokeAi => "invokeAI",
            SubAction::InvokeStream => "invokeStream",
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, SubAction::InvokeStream)
    }
}

/// A message as sent to the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ConnectorMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Sampling parameters each connector family expects.
///
/// `.gen-ai` gets `{ n: 1, stop: null, temperature: 0.2 }`; every other
/// connector gets `{ temperature: 0, stopSequences: [] }`.
pub fn connector_tuning(action_type_id: &str) -> Map<String, Value> {
    let tuning = if action_type_id == GEN_AI_ACTION_TYPE_ID {
        json!({ "n": 1, "stop": null, "temperature": 0.2 })
    } else {
        json!({ "temperature": 0, "stopSequences": [] })
    };
    match tuning {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// One connector execution.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub connector_id: String,
    pub action_type_id: String,
    pub sub_action: SubAction,
    pub model: Option<String>,
    pub messages: Vec<ConnectorMessage>,
    /// Cancelled when the caller goes away.
    pub cancellation: CancellationToken,
}

impl ActionRequest {
    pub fn new(
        connector_id: impl Into<String>,
        action_type_id: impl Into<String>,
        sub_action: SubAction,
    ) -> Self {
        Self {
            connector_id: connector_id.into(),
            action_type_id: action_type_id.into(),
            sub_action,
            model: None,
            messages: Vec::new(),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn with_message(mut self, message: ConnectorMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = ConnectorMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// `subActionParams` as the actions API expects them.
    pub fn sub_action_params(&self) -> Value {
        let mut params = Map::new();
        if let Some(model) = &self.model {
            params.insert("model".to_string(), Value::String(model.clone()));
        }
        params.insert("messages".to_string(), json!(self.messages));
        params.extend(connector_tuning(&self.action_type_id));
        Value::Object(params)
    }

    /// Full `params` body: `{ subAction, subActionParams }`.
    pub fn params(&self) -> Value {
        json!({
            "subAction": self.sub_action.as_str(),
            "subActionParams": self.sub_action_params(),
        })
    }
}

/// Outcome reported by the connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Ok,
    Error,
}

/// Result of a connector execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub connector_id: String,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_data: Option<TraceData>,
}

impl ActionResult {
    pub fn ok(connector_id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            connector_id: connector_id.into(),
            status: ActionStatus::Ok,
            data: Some(data.into()),
            message: None,
            trace_data: None,
        }
    }

    pub fn error(connector_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            connector_id: connector_id.into(),
            status: ActionStatus::Error,
            data: None,
            message: Some(message.into()),
            trace_data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ActionStatus::Ok
    }
}

/// Errors raised while executing a connector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action execution was cancelled")]
    Cancelled,

    #[error("connector not found: {0}")]
    ConnectorNotFound(String),

    #[error("connector returned status {status}: {message}")]
    Connector { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("actions client is not configured")]
    NotConfigured,
}

impl From<ActionError> for DomainError {
    fn from(err: ActionError) -> Self {
        DomainError::new(ErrorCode::ConnectorError, err.to_string())
    }
}

/// Executes actions connectors.
#[async_trait]
pub trait ActionsClient: Send + Sync {
    /// Run one sub-action on a connector.
    ///
    /// A connector that ran but failed reports `Ok` with
    /// [`ActionStatus::Error`]; `Err` is reserved for failures to reach it.
    async fn execute(&self, request: ActionRequest) -> Result<ActionResult, ActionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_ai_tuning() {
        let tuning = connector_tuning(".gen-ai");
        assert_eq!(tuning["n"], json!(1));
        assert_eq!(tuning["stop"], Value::Null);
        assert_eq!(tuning["temperature"], json!(0.2));
        assert!(!tuning.contains_key("stopSequences"));
    }

    #[test]
    fn other_connector_tuning() {
        let tuning = connector_tuning(".bedrock");
        assert_eq!(tuning["temperature"], json!(0));
        assert_eq!(tuning["stopSequences"], json!([]));
        assert!(!tuning.contains_key("n"));
    }

    #[test]
    fn params_carry_sub_action_and_messages() {
        let request = ActionRequest::new("c1", ".gen-ai", SubAction::InvokeAi)
            .with_model(Some("gpt-4".into()))
            .with_message(ConnectorMessage::new(MessageRole::System, "sys"))
            .with_message(ConnectorMessage::new(MessageRole::User, "hi"));

        let params = request.params();
        assert_eq!(params["subAction"], "invokeAI");
        assert_eq!(params["subActionParams"]["model"], "gpt-4");
        assert_eq!(params["subActionParams"]["messages"][0]["role"], "system");
        assert_eq!(params["subActionParams"]["messages"][1]["content"], "hi");
        assert_eq!(params["subActionParams"]["temperature"], json!(0.2));
    }

    #[test]
    fn model_is_omitted_when_absent() {
        let request = ActionRequest::new("c1", ".bedrock", SubAction::InvokeStream);
        assert!(request.sub_action_params().get("model").is_none());
        assert_eq!(request.params()["subAction"], "invokeStream");
    }

    #[test]
    fn sub_action_serializes_with_wire_names() {
        assert_eq!(serde_json::to_string(&SubAction::InvokeAi).unwrap(), "\"invokeAI\"");
        let parsed: SubAction = serde_json::from_str("\"invokeStream\"").unwrap();
        assert!(parsed.is_stream());
    }

    #[test]
    fn action_error_maps_to_connector_error_code() {
        let err: DomainError = ActionError::Network("reset".into()).into();
        assert_eq!(err.code(), ErrorCode::ConnectorError);
    }
}

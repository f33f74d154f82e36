//! Event-based telemetry port.

use serde::Serialize;

pub const INVOKE_ASSISTANT_SUCCESS_EVENT: &str = "invoke_assistant_success";
pub const INVOKE_ASSISTANT_ERROR_EVENT: &str = "invoke_assistant_error";

/// Properties reported for each assistant invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeAssistantProperties {
    pub action_type_id: String,
    pub is_enabled_knowledge_base: bool,
    #[serde(rename = "isEnabledRAGAlerts")]
    pub is_enabled_rag_alerts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub assistant_streaming_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    InvokeAssistantSuccess(InvokeAssistantProperties),
    InvokeAssistantError(InvokeAssistantProperties),
}

impl TelemetryEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            TelemetryEvent::InvokeAssistantSuccess(_) => INVOKE_ASSISTANT_SUCCESS_EVENT,
            TelemetryEvent::InvokeAssistantError(_) => INVOKE_ASSISTANT_ERROR_EVENT,
        }
    }

    pub fn properties(&self) -> &InvokeAssistantProperties {
        match self {
            TelemetryEvent::InvokeAssistantSuccess(p) | TelemetryEvent::InvokeAssistantError(p) => p,
        }
    }
}

/// Fire-and-forget sink for telemetry events.
pub trait TelemetryReporter: Send + Sync {
    fn report_event(&self, event: TelemetryEvent);
}

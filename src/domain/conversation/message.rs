//! Conversation messages.
//!
//! A `Message` is what gets stored on a conversation. A `NewMessage` is what a
//! caller submits: content plus an optional role, with the timestamp assigned
//! at the moment it is persisted.

use crate::domain::foundation::Timestamp;
use serde::{Deserialize, Serialize};

/// Text stored in place of an empty LLM response.
pub const EMPTY_LLM_RESPONSE_MESSAGE: &str = "Error: Response from LLM API is empty or undefined.";

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions.
    System,
    /// User input.
    #[default]
    User,
    /// Assistant (LLM) response.
    Assistant,
}

impl MessageRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// APM identifiers attached to an assistant response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl TraceData {
    /// True when neither identifier is set.
    pub fn is_empty(&self) -> bool {
        self.transaction_id.is_none() && self.trace_id.is_none()
    }
}

/// A stored conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_data: Option<TraceData>,
}

impl Message {
    /// Creates a message stamped with the current time.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Timestamp::now(),
            is_error: None,
            trace_data: None,
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Sets the stored timestamp.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Marks the message as an error response.
    pub fn with_error(mut self, is_error: bool) -> Self {
        self.is_error = Some(is_error);
        self
    }

    /// Attaches trace identifiers.
    pub fn with_trace_data(mut self, trace_data: TraceData) -> Self {
        self.trace_data = Some(trace_data);
        self
    }

    /// Builds the assistant message for a raw LLM response.
    ///
    /// Missing or empty content is replaced by an error message flagged with
    /// `is_error`; trace data is dropped in that case.
    pub fn from_raw_response(
        raw_content: Option<&str>,
        is_error: Option<bool>,
        trace_data: Option<TraceData>,
    ) -> Self {
        match raw_content {
            Some(content) if !content.is_empty() => Self {
                role: MessageRole::Assistant,
                content: content.to_string(),
                timestamp: Timestamp::now(),
                is_error,
                trace_data,
            },
            _ => Self::assistant(EMPTY_LLM_RESPONSE_MESSAGE).with_error(true),
        }
    }

    /// True when the message records a failed response.
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// A message submitted by a caller, not yet stamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,
    pub content: String,
}

impl NewMessage {
    /// Creates a new message with an explicit role.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Role, falling back to `user` when none was given.
    pub fn role_or_default(&self) -> MessageRole {
        self.role.unwrap_or_default()
    }

    /// Stamps the message with the current time.
    pub fn stamp(&self) -> Message {
        Message::new(self.role_or_default(), self.content.clone())
    }
}

impl From<&Message> for NewMessage {
    fn from(message: &Message) -> Self {
        Self::new(message.role, message.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_response_with_content_keeps_flags() {
        let trace = TraceData {
            transaction_id: Some("tx".into()),
            trace_id: None,
        };
        let msg = Message::from_raw_response(Some("Hello"), Some(false), Some(trace.clone()));
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.content, "Hello");
        assert_eq!(msg.is_error, Some(false));
        assert_eq!(msg.trace_data, Some(trace));
    }

    #[test]
    fn empty_raw_response_becomes_error_message() {
        for raw in [None, Some("")] {
            let msg = Message::from_raw_response(raw, None, Some(TraceData::default()));
            assert_eq!(msg.content, EMPTY_LLM_RESPONSE_MESSAGE);
            assert!(msg.is_error());
            assert!(msg.trace_data.is_none());
        }
    }

    #[test]
    fn new_message_role_defaults_to_user() {
        let msg = NewMessage {
            role: None,
            content: "hi".into(),
        };
        assert_eq!(msg.role_or_default(), MessageRole::User);
        assert_eq!(msg.stamp().role, MessageRole::User);
    }

    #[test]
    fn message_serializes_camel_case() {
        let msg = Message::assistant("x").with_error(true);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["isError"], true);
        assert!(json.get("traceData").is_none());
    }
}

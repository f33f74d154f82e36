//! The Conversation entity.

use crate::domain::foundation::{ConversationId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::message::Message;
use super::replacements::Replacements;

/// Title a conversation carries until one has been generated for it.
pub const NEW_CHAT: &str = "New chat";

/// Connector settings a conversation was started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub connector_id: String,
    pub action_type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_system_prompt_id: Option<String>,
}

/// A persisted exchange of user and assistant messages.
///
/// # Invariants
///
/// - `title` is [`NEW_CHAT`] until the first title generation succeeds
/// - `messages` are kept in append order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub replacements: Replacements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_config: Option<ApiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Conversation {
    /// Materializes a new conversation from creation props.
    pub fn create(id: ConversationId, props: NewConversation) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            title: props.title,
            messages: props.messages,
            replacements: props.replacements,
            api_config: props.api_config,
            created_by: props.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// True while the conversation still carries the placeholder title.
    pub fn has_placeholder_title(&self) -> bool {
        self.title == NEW_CHAT
    }

    /// Appends messages in order and bumps `updated_at`.
    pub fn append(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
        self.updated_at = Timestamp::now();
    }

    /// Applies a partial update. Absent fields are left untouched.
    pub fn apply(&mut self, update: &ConversationUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(replacements) = &update.replacements {
            self.replacements.merge(replacements);
        }
        if let Some(api_config) = &update.api_config {
            self.api_config = Some(api_config.clone());
        }
        self.updated_at = Timestamp::now();
    }
}

/// Props for creating a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    pub title: String,
    pub messages: Vec<Message>,
    pub replacements: Replacements,
    pub api_config: Option<ApiConfig>,
    pub created_by: Option<UserId>,
}

/// Partial update of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationUpdate {
    pub id: ConversationId,
    pub title: Option<String>,
    pub replacements: Option<Replacements>,
    pub api_config: Option<ApiConfig>,
}

impl ConversationUpdate {
    /// An update that changes nothing yet.
    pub fn new(id: ConversationId) -> Self {
        Self {
            id,
            title: None,
            replacements: None,
            api_config: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = Some(replacements);
        self
    }
}

//! Conversations data client port.
//!
//! Storage for assistant conversations. The workflow never rewrites a
//! conversation wholesale: it creates, applies partial updates, or appends.
//! Implementations are not required to provide optimistic concurrency, so two
//! concurrent appends to the same conversation may lose one of them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::{Conversation, ConversationUpdate, Message, NewConversation};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};

/// Errors raised by a conversations store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataClientError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<DataClientError> for DomainError {
    fn from(err: DataClientError) -> Self {
        DomainError::new(ErrorCode::DatabaseError, err.to_string())
    }
}

#[async_trait]
pub trait ConversationsDataClient: Send + Sync {
    /// Returns `None` if no conversation has that id.
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, DataClientError>;

    /// Persist a new conversation under a fresh id.
    async fn create_conversation(
        &self,
        conversation: NewConversation,
    ) -> Result<Conversation, DataClientError>;

    /// Apply a partial update. Returns `None` if the conversation is gone.
    async fn update_conversation(
        &self,
        update: ConversationUpdate,
    ) -> Result<Option<Conversation>, DataClientError>;

    /// Append messages to `existing`. Returns `None` if it is gone.
    async fn append_conversation_messages(
        &self,
        existing: &Conversation,
        messages: Vec<Message>,
    ) -> Result<Option<Conversation>, DataClientError>;
}

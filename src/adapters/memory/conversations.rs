//! In-memory conversations store.
//!
//! Useful for testing and development. Data is lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::{Conversation, ConversationUpdate, Message, NewConversation};
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationsDataClient, DataClientError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationsDataClient {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationsDataClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a conversation as-is (useful for tests).
    pub async fn insert(&self, conversation: Conversation) {
        self.conversations
            .write()
            .await
            .insert(conversation.id, conversation);
    }

    pub async fn count(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn all(&self) -> Vec<Conversation> {
        self.conversations.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl ConversationsDataClient for InMemoryConversationsDataClient {
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, DataClientError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn create_conversation(
        &self,
        conversation: NewConversation,
    ) -> Result<Conversation, DataClientError> {
        let created = Conversation::create(ConversationId::new(), conversation);
        self.conversations
            .write()
            .await
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_conversation(
        &self,
        update: ConversationUpdate,
    ) -> Result<Option<Conversation>, DataClientError> {
        let mut conversations = self.conversations.write().await;
        Ok(conversations.get_mut(&update.id).map(|existing| {
            existing.apply(&update);
            existing.clone()
        }))
    }

    async fn append_conversation_messages(
        &self,
        existing: &Conversation,
        messages: Vec<Message>,
    ) -> Result<Option<Conversation>, DataClientError> {
        // Last writer wins: the caller's snapshot replaces the stored copy.
        let mut conversations = self.conversations.write().await;
        if !conversations.contains_key(&existing.id) {
            return Ok(None);
        }
        let mut updated = existing.clone();
        updated.append(messages);
        conversations.insert(updated.id, updated.clone());
        Ok(Some(updated))
    }
}

//! GetConversationHandler - Query handler for reading a conversation.

use std::sync::Arc;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::ConversationsDataClient;

/// Handler for reading conversations.
pub struct GetConversationHandler {
    conversations: Arc<dyn ConversationsDataClient>,
}

impl GetConversationHandler {
    pub fn new(conversations: Arc<dyn ConversationsDataClient>) -> Self {
        Self { conversations }
    }

    pub async fn handle(&self, conversation_id: &ConversationId) -> Result<Conversation, DomainError> {
        match self.conversations.get_conversation(conversation_id).await {
            Ok(Some(conversation)) => Ok(conversation),
            Ok(None) => Err(DomainError::new(
                ErrorCode::ConversationNotFound,
                format!("conversation id: \"{}\" not found", conversation_id),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConversationsDataClient;
    use crate::domain::conversation::{Message, NewConversation, Replacements};

    #[tokio::test]
    async fn returns_stored_conversation() {
        let store = InMemoryConversationsDataClient::new();
        let conversation = Conversation::create(
            ConversationId::new(),
            NewConversation {
                title: "Triage".into(),
                messages: vec![Message::user("hi")],
                replacements: Replacements::new(),
                api_config: None,
                created_by: None,
            },
        );
        store.insert(conversation.clone()).await;

        let handler = GetConversationHandler::new(Arc::new(store));
        let found = handler.handle(&conversation.id).await.unwrap();

        assert_eq!(found.title, "Triage");
        assert_eq!(found.messages.len(), 1);
    }

    #[tokio::test]
    async fn missing_conversation_is_not_found() {
        let handler = GetConversationHandler::new(Arc::new(InMemoryConversationsDataClient::new()));
        let id = ConversationId::new();

        let err = handler.handle(&id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConversationNotFound);
        assert!(err.message.contains(&id.to_string()));
    }
}

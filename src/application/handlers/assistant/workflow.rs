//! Conversation create/update/append workflow.
//!
//! Every chat turn passes through here before and after the LLM call:
//! user input is recorded (creating the conversation and its title on the
//! first turn) and the assistant's answer is appended afterwards.

use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::conversation::{
    replace_anonymized_values_with_original_values, ApiConfig, Conversation, ConversationUpdate,
    Message, NewConversation, NewMessage, Replacements, TraceData,
};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, UserId};
use crate::ports::{ActionsClient, ConversationsDataClient, DataClientError};

use super::title::{generate_title_for_new_chat, ConnectorTarget};

/// Errors from the conversation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateConversationError {
    #[error("conversation id: \"{0}\" not found")]
    NotFound(ConversationId),

    #[error(transparent)]
    DataClient(#[from] DataClientError),
}

impl From<UpdateConversationError> for DomainError {
    fn from(err: UpdateConversationError) -> Self {
        match err {
            UpdateConversationError::NotFound(_) => {
                DomainError::new(ErrorCode::ConversationNotFound, err.to_string())
            }
            UpdateConversationError::DataClient(e) => e.into(),
        }
    }
}

/// User input for one chat turn.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub conversation_id: Option<ConversationId>,
    pub target: ConnectorTarget,
    pub new_messages: Option<Vec<NewMessage>>,
    pub replacements: Replacements,
    pub prompt_id: Option<String>,
    pub response_language: Option<String>,
    pub created_by: Option<UserId>,
    pub cancellation: CancellationToken,
}

impl UserInput {
    pub fn new(target: ConnectorTarget) -> Self {
        Self {
            conversation_id: None,
            target,
            new_messages: None,
            replacements: Replacements::new(),
            prompt_id: None,
            response_language: None,
            created_by: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_conversation_id(mut self, id: ConversationId) -> Self {
        self.conversation_id = Some(id);
        self
    }

    pub fn with_messages(mut self, messages: Vec<NewMessage>) -> Self {
        self.new_messages = Some(messages);
        self
    }

    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = replacements;
        self
    }

    pub fn with_response_language(mut self, language: impl Into<String>) -> Self {
        self.response_language = Some(language.into());
        self
    }
}

/// An LLM answer to record on a conversation.
#[derive(Debug, Clone, Default)]
pub struct AssistantReply {
    pub content: String,
    pub replacements: Replacements,
    pub is_error: bool,
    pub trace_data: Option<TraceData>,
}

/// Orchestrates conversation persistence around LLM calls.
pub struct ConversationWorkflow {
    conversations: Arc<dyn ConversationsDataClient>,
    actions: Arc<dyn ActionsClient>,
}

impl ConversationWorkflow {
    pub fn new(
        conversations: Arc<dyn ConversationsDataClient>,
        actions: Arc<dyn ActionsClient>,
    ) -> Self {
        Self {
            conversations,
            actions,
        }
    }

    /// Records user input, creating the conversation when no id is given.
    ///
    /// A new conversation is only created once a title has been generated
    /// for it. When title generation fails nothing is persisted and `None`
    /// is returned.
    pub async fn create_or_update_conversation_with_user_input(
        &self,
        input: UserInput,
    ) -> Result<Option<Conversation>, UpdateConversationError> {
        let Some(conversation_id) = input.conversation_id else {
            return self.create_from_user_input(input).await;
        };
        self.update_conversation_with_user_input(conversation_id, input)
            .await
    }

    async fn create_from_user_input(
        &self,
        input: UserInput,
    ) -> Result<Option<Conversation>, UpdateConversationError> {
        let Some(first) = input.new_messages.as_ref().and_then(|m| m.first()) else {
            return Ok(None);
        };

        let outcome = generate_title_for_new_chat(
            self.actions.as_ref(),
            first,
            &input.target,
            input.response_language.as_deref(),
            &input.cancellation,
        )
        .await;

        let Some(title) = outcome.into_title() else {
            warn!(
                connector_id = %input.target.connector_id,
                "No title generated, conversation not created"
            );
            return Ok(None);
        };

        let messages = input
            .new_messages
            .iter()
            .flatten()
            .map(NewMessage::stamp)
            .collect();

        let created = self
            .conversations
            .create_conversation(NewConversation {
                title,
                messages,
                replacements: input.replacements,
                api_config: Some(ApiConfig {
                    connector_id: input.target.connector_id,
                    action_type_id: input.target.action_type_id,
                    model: input.target.model,
                    default_system_prompt_id: input.prompt_id,
                }),
                created_by: input.created_by,
            })
            .await?;

        debug!(conversation_id = %created.id, "Created conversation");
        Ok(Some(created))
    }

    /// Records user input on an existing conversation.
    ///
    /// A conversation still titled "New chat" is retitled from the first new
    /// message, or its own first message when there are none.
    pub async fn update_conversation_with_user_input(
        &self,
        conversation_id: ConversationId,
        input: UserInput,
    ) -> Result<Option<Conversation>, UpdateConversationError> {
        let mut conversation = self
            .conversations
            .get_conversation(&conversation_id)
            .await?
            .ok_or(UpdateConversationError::NotFound(conversation_id))?;

        let title_source = input
            .new_messages
            .as_ref()
            .and_then(|m| m.first().cloned())
            .or_else(|| conversation.messages.first().map(NewMessage::from));

        if let Some(message) = title_source.filter(|_| conversation.has_placeholder_title()) {
            let outcome = generate_title_for_new_chat(
                self.actions.as_ref(),
                &message,
                &input.target,
                input.response_language.as_deref(),
                &input.cancellation,
            )
            .await;

            if let Some(title) = outcome.into_title() {
                let update = ConversationUpdate::new(conversation_id).with_title(title);
                if let Some(updated) = self.conversations.update_conversation(update).await? {
                    conversation = updated;
                }
            }
        }

        match &input.new_messages {
            Some(messages) => {
                self.append_message_to_conversation(&conversation, messages, &input.replacements)
                    .await
            }
            None => Ok(Some(conversation)),
        }
    }

    /// Appends user-side messages, restoring anonymized values first.
    pub async fn append_message_to_conversation(
        &self,
        conversation: &Conversation,
        messages: &[NewMessage],
        replacements: &Replacements,
    ) -> Result<Option<Conversation>, UpdateConversationError> {
        let stamped = messages
            .iter()
            .map(|m| {
                Message::new(
                    m.role_or_default(),
                    replace_anonymized_values_with_original_values(&m.content, replacements),
                )
            })
            .collect();

        Ok(self
            .conversations
            .append_conversation_messages(conversation, stamped)
            .await?)
    }

    /// Appends the assistant's answer and stores any replacements.
    ///
    /// Missing conversations are ignored.
    pub async fn append_assistant_message_to_conversation(
        &self,
        conversation_id: ConversationId,
        reply: AssistantReply,
    ) -> Result<(), UpdateConversationError> {
        let Some(conversation) = self.conversations.get_conversation(&conversation_id).await?
        else {
            debug!(conversation_id = %conversation_id, "Conversation gone, reply dropped");
            return Ok(());
        };

        let content =
            replace_anonymized_values_with_original_values(&reply.content, &reply.replacements);
        let message = Message::from_raw_response(
            Some(content.as_str()),
            Some(reply.is_error),
            reply.trace_data.filter(|t| !t.is_empty()),
        );
        self.conversations
            .append_conversation_messages(&conversation, vec![message])
            .await?;

        if !reply.replacements.is_empty() {
            self.conversations
                .update_conversation(
                    ConversationUpdate::new(conversation_id).with_replacements(reply.replacements),
                )
                .await?;
        }
        Ok(())
    }

    pub async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, UpdateConversationError> {
        Ok(self.conversations.get_conversation(id).await?)
    }
}

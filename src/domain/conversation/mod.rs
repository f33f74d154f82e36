//! Conversation domain module.
//!
//! Conversations, their messages, the anonymization replacement map and the
//! rules for generated titles.

mod conversation;
mod message;
mod replacements;
mod title;

pub use conversation::{ApiConfig, Conversation, ConversationUpdate, NewConversation, NEW_CHAT};
pub use message::{Message, MessageRole, NewMessage, TraceData, EMPTY_LLM_RESPONSE_MESSAGE};
pub use replacements::{replace_anonymized_values_with_original_values, Replacements};
pub use title::{extract_title, title_system_prompt, DEFAULT_RESPONSE_LANGUAGE};

//! Title generation for new chats.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::conversation::{
    extract_title, title_system_prompt, MessageRole, NewMessage, DEFAULT_RESPONSE_LANGUAGE,
};
use crate::ports::{ActionRequest, ActionsClient, ConnectorMessage, SubAction};

/// The connector a conversation turn runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorTarget {
    pub connector_id: String,
    pub action_type_id: String,
    pub model: Option<String>,
}

impl ConnectorTarget {
    pub fn new(connector_id: impl Into<String>, action_type_id: impl Into<String>) -> Self {
        Self {
            connector_id: connector_id.into(),
            action_type_id: action_type_id.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Result of asking the LLM for a title.
///
/// Title generation never fails its caller: every error becomes
/// `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOutcome {
    Generated(String),
    Unavailable { reason: String },
}

impl TitleOutcome {
    pub fn title(&self) -> Option<&str> {
        match self {
            TitleOutcome::Generated(title) => Some(title),
            TitleOutcome::Unavailable { .. } => None,
        }
    }

    pub fn into_title(self) -> Option<String> {
        match self {
            TitleOutcome::Generated(title) => Some(title),
            TitleOutcome::Unavailable { .. } => None,
        }
    }
}

/// Asks the connector for a conversation title based on `message`.
///
/// Makes exactly one `invokeAI` call. A single layer of surrounding quotes is
/// stripped from the answer; a blank answer is `Unavailable`.
pub async fn generate_title_for_new_chat(
    actions: &dyn ActionsClient,
    message: &NewMessage,
    target: &ConnectorTarget,
    response_language: Option<&str>,
    cancellation: &CancellationToken,
) -> TitleOutcome {
    let language = response_language.unwrap_or(DEFAULT_RESPONSE_LANGUAGE);
    let request = ActionRequest::new(&target.connector_id, &target.action_type_id, SubAction::InvokeAi)
        .with_model(target.model.clone())
        .with_message(ConnectorMessage::new(
            MessageRole::System,
            title_system_prompt(language),
        ))
        .with_message(ConnectorMessage::new(
            message.role_or_default(),
            message.content.clone(),
        ))
        .with_cancellation(cancellation.clone());

    let outcome = match actions.execute(request).await {
        Ok(result) if result.is_ok() => match result.data {
            Some(data) => {
                let title = extract_title(&data);
                if title
                    .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
                    .is_empty()
                {
                    TitleOutcome::Unavailable {
                        reason: "connector returned an empty title".to_string(),
                    }
                } else {
                    TitleOutcome::Generated(title)
                }
            }
            None => TitleOutcome::Unavailable {
                reason: "connector returned no data".to_string(),
            },
        },
        Ok(result) => TitleOutcome::Unavailable {
            reason: result
                .message
                .unwrap_or_else(|| "connector returned an error status".to_string()),
        },
        Err(e) => TitleOutcome::Unavailable {
            reason: e.to_string(),
        },
    };

    match &outcome {
        TitleOutcome::Generated(title) => debug!(title = %title, "Generated conversation title"),
        TitleOutcome::Unavailable { reason } => {
            warn!(connector_id = %target.connector_id, reason = %reason, "Title generation failed")
        }
    }
    outcome
}

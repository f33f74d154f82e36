//! Actions client used when no actions API is configured.

use async_trait::async_trait;
use tracing::warn;

use crate::ports::{ActionError, ActionRequest, ActionResult, ActionsClient};

/// Fails every execution with `ActionError::NotConfigured`.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredActionsClient;

#[async_trait]
impl ActionsClient for UnconfiguredActionsClient {
    async fn execute(&self, request: ActionRequest) -> Result<ActionResult, ActionError> {
        warn!(
            connector_id = %request.connector_id,
            "Connector execution requested but no actions API is configured"
        );
        Err(ActionError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SubAction;

    #[tokio::test]
    async fn every_execution_is_not_configured() {
        let client = UnconfiguredActionsClient;
        let request = ActionRequest::new("my-connector", ".gen-ai", SubAction::InvokeAi);

        let err = client.execute(request).await.unwrap_err();

        assert_eq!(err, ActionError::NotConfigured);
    }
}

//! Mock actions client for testing.
//!
//! Configurable implementation of the `ActionsClient` port so the assistant
//! workflow can be exercised without a running connector.
//!
//! # Example
//!
//! ```ignore
//! let client = MockActionsClient::new()
//!     .with_response("\"Triage of host alerts\"")
//!     .with_error(ActionError::Network("reset".into()));
//!
//! let result = client.execute(request).await?;
//! assert_eq!(result.data.as_deref(), Some("\"Triage of host alerts\""));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::conversation::TraceData;
use crate::ports::{ActionError, ActionRequest, ActionResult, ActionsClient};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockActionResponse {
    /// Connector ran and answered with `data`.
    Ok {
        data: String,
        trace_data: Option<TraceData>,
    },
    /// Connector ran and reported an error status.
    ErrorStatus { message: String },
    /// Connector could not be reached.
    Fail(ActionError),
}

/// Mock actions client.
///
/// Responses are consumed in order; once the queue is empty every call
/// answers `"Mock response"`.
#[derive(Debug, Clone)]
pub struct MockActionsClient {
    responses: Arc<Mutex<VecDeque<MockActionResponse>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<ActionRequest>>>,
}

impl Default for MockActionsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockActionsClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, data: impl Into<String>) -> Self {
        self.push(MockActionResponse::Ok {
            data: data.into(),
            trace_data: None,
        })
    }

    /// Queues a successful response carrying trace ids.
    pub fn with_traced_response(self, data: impl Into<String>, trace_data: TraceData) -> Self {
        self.push(MockActionResponse::Ok {
            data: data.into(),
            trace_data: Some(trace_data),
        })
    }

    /// Queues a response with `status: error`.
    pub fn with_error_status(self, message: impl Into<String>) -> Self {
        self.push(MockActionResponse::ErrorStatus {
            message: message.into(),
        })
    }

    /// Queues a transport failure.
    pub fn with_error(self, error: ActionError) -> Self {
        self.push(MockActionResponse::Fail(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn get_calls(&self) -> Vec<ActionRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(self, response: MockActionResponse) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    fn next_response(&self) -> MockActionResponse {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| MockActionResponse::Ok {
                data: "Mock response".to_string(),
                trace_data: None,
            })
    }
}

#[async_trait]
impl ActionsClient for MockActionsClient {
    async fn execute(&self, request: ActionRequest) -> Result<ActionResult, ActionError> {
        let connector_id = request.connector_id.clone();
        let cancellation = request.cancellation.clone();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if !self.delay.is_zero() {
            tokio::select! {
                _ = cancellation.cancelled() => return Err(ActionError::Cancelled),
                _ = sleep(self.delay) => {}
            }
        }

        match self.next_response() {
            MockActionResponse::Ok { data, trace_data } => {
                let mut result = ActionResult::ok(connector_id, data);
                result.trace_data = trace_data;
                Ok(result)
            }
            MockActionResponse::ErrorStatus { message } => {
                Ok(ActionResult::error(connector_id, message))
            }
            MockActionResponse::Fail(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SubAction;

    fn request() -> ActionRequest {
        ActionRequest::new("connector-1", ".gen-ai", SubAction::InvokeAi)
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let client = MockActionsClient::new()
            .with_response("first")
            .with_error_status("boom")
            .with_error(ActionError::Network("reset".into()));

        let first = client.execute(request()).await.unwrap();
        assert!(first.is_ok());
        assert_eq!(first.data.as_deref(), Some("first"));
        assert_eq!(first.connector_id, "connector-1");

        let second = client.execute(request()).await.unwrap();
        assert!(!second.is_ok());
        assert_eq!(second.message.as_deref(), Some("boom"));

        let third = client.execute(request()).await;
        assert_eq!(third.unwrap_err(), ActionError::Network("reset".into()));
    }

    #[tokio::test]
    async fn falls_back_to_default_response() {
        let client = MockActionsClient::new();
        let result = client.execute(request()).await.unwrap();
        assert_eq!(result.data.as_deref(), Some("Mock response"));
    }

    #[tokio::test]
    async fn records_calls() {
        let client = MockActionsClient::new();
        client.execute(request()).await.unwrap();
        client.execute(request()).await.unwrap();

        assert_eq!(client.call_count(), 2);
        assert_eq!(client.get_calls()[0].action_type_id, ".gen-ai");
    }

    #[tokio::test]
    async fn cancellation_interrupts_delay() {
        let client = MockActionsClient::new().with_delay(Duration::from_secs(30));
        let req = request();
        req.cancellation.cancel();

        let result = client.execute(req).await;
        assert_eq!(result.unwrap_err(), ActionError::Cancelled);
    }
}

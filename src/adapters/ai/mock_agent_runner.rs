//! Mock agent runner for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::{AgentError, AgentExecutorParams, AgentResponse, AgentRunner};

/// Agent runner returning queued responses and recording its calls.
#[derive(Debug, Clone, Default)]
pub struct MockAgentRunner {
    responses: Arc<Mutex<VecDeque<Result<AgentResponse, AgentError>>>>,
    calls: Arc<Mutex<Vec<AgentExecutorParams>>>,
}

impl MockAgentRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: AgentResponse) -> Self {
        self.push(Ok(response))
    }

    pub fn with_error(self, error: AgentError) -> Self {
        self.push(Err(error))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn get_calls(&self) -> Vec<AgentExecutorParams> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(self, response: Result<AgentResponse, AgentError>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }
}

#[async_trait]
impl AgentRunner for MockAgentRunner {
    async fn run(&self, params: AgentExecutorParams) -> Result<AgentResponse, AgentError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(params);

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Ok(AgentResponse {
                    data: "Mock agent response".to_string(),
                    ..Default::default()
                })
            })
    }
}

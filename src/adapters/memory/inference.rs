//! In-memory inference endpoint reader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::inference::{DeploymentStatus, InferenceEndpoint};
use crate::ports::InferenceEndpointReader;

#[derive(Debug, Clone, Default)]
pub struct InMemoryInferenceEndpoints {
    endpoints: Arc<RwLock<Vec<InferenceEndpoint>>>,
    statuses: Arc<RwLock<HashMap<String, DeploymentStatus>>>,
}

impl InMemoryInferenceEndpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_endpoint(&self, endpoint: InferenceEndpoint) {
        self.endpoints.write().await.push(endpoint);
    }

    pub async fn set_status(&self, model_id: impl Into<String>, status: DeploymentStatus) {
        self.statuses.write().await.insert(model_id.into(), status);
    }
}

#[async_trait]
impl InferenceEndpointReader for InMemoryInferenceEndpoints {
    async fn list_endpoints(&self) -> Result<Vec<InferenceEndpoint>, DomainError> {
        Ok(self.endpoints.read().await.clone())
    }

    async fn deployment_statuses(&self) -> Result<HashMap<String, DeploymentStatus>, DomainError> {
        Ok(self.statuses.read().await.clone())
    }
}

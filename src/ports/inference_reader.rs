//! Inference endpoint reader port (read side).

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::DomainError;
use crate::domain::inference::{DeploymentStatus, InferenceEndpoint};

#[async_trait]
pub trait InferenceEndpointReader: Send + Sync {
    /// All configured inference endpoints.
    async fn list_endpoints(&self) -> Result<Vec<InferenceEndpoint>, DomainError>;

    /// Deployment status per trained model id.
    async fn deployment_statuses(&self) -> Result<HashMap<String, DeploymentStatus>, DomainError>;
}

//! Inference endpoint records as returned by the inference API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Service backing an inference endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceProvider {
    Amazonbedrock,
    Anthropic,
    Azureaistudio,
    Azureopenai,
    Cohere,
    Elasticsearch,
    Elser,
    Googleaistudio,
    Googlevertexai,
    #[serde(rename = "hugging_face")]
    HuggingFace,
    Mistral,
    Openai,
}

impl ServiceProvider {
    /// True for services whose models are deployed inside the cluster.
    pub fn is_elastic_service(&self) -> bool {
        matches!(self, ServiceProvider::Elasticsearch | ServiceProvider::Elser)
    }
}

/// Task an endpoint performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Completion,
    Rerank,
    SparseEmbedding,
    TextEmbedding,
}

/// Deployment state of the model behind an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Deployed,
    NotDeployed,
    NotDeployable,
    NotApplicable,
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeploymentStatus::Deployed => "deployed",
            DeploymentStatus::NotDeployed => "not_deployed",
            DeploymentStatus::NotDeployable => "not_deployable",
            DeploymentStatus::NotApplicable => "not_applicable",
        };
        f.write_str(s)
    }
}

/// Service-specific settings; only the deployed model id matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

/// One configured inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceEndpoint {
    pub inference_id: String,
    pub model_id: String,
    pub service: ServiceProvider,
    pub task_type: TaskType,
    #[serde(default)]
    pub service_settings: ServiceSettings,
}

impl InferenceEndpoint {
    pub fn new(
        inference_id: impl Into<String>,
        model_id: impl Into<String>,
        service: ServiceProvider,
        task_type: TaskType,
    ) -> Self {
        Self {
            inference_id: inference_id.into(),
            model_id: model_id.into(),
            service,
            task_type,
            service_settings: ServiceSettings::default(),
        }
    }

    /// Sets the deployed model id in the service settings.
    pub fn with_deployed_model(mut self, model_id: impl Into<String>) -> Self {
        self.service_settings.model_id = Some(model_id.into());
        self
    }
}

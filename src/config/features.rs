//! Feature flags configuration

use serde::Deserialize;

use crate::domain::capabilities::AssistantFeatures;

/// Assistant feature flags registered for the default plugin at startup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Route knowledge-base requests through the assistant graph
    #[serde(default)]
    pub assistant_knowledge_base_by_default: bool,

    /// Expose the model evaluation route
    #[serde(default)]
    pub assistant_model_evaluation: bool,

    /// Offer the attack discovery tool
    #[serde(default)]
    pub attack_discovery_enabled: bool,
}

impl FeatureFlags {
    pub fn assistant_features(&self) -> AssistantFeatures {
        AssistantFeatures {
            knowledge_base_by_default: self.assistant_knowledge_base_by_default,
            model_evaluation: self.assistant_model_evaluation,
            attack_discovery_enabled: self.attack_discovery_enabled,
        }
    }
}

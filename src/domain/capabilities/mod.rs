//! Assistant capabilities (feature flags) and registered tools.
//!
//! Both are resolved per originating plugin. Routes gate on a capability by
//! key; the execute path reads the knowledge-base flag to choose a strategy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Plugin name assumed when the request does not identify its origin.
pub const DEFAULT_PLUGIN_NAME: &str = "securitySolutionUI";

/// Tool id excluded from conversational execution.
pub const ATTACK_DISCOVERY_TOOL_ID: &str = "attack-discovery";

/// Named assistant capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssistantFeatureKey {
    #[serde(rename = "assistantKnowledgeBaseByDefault")]
    KnowledgeBaseByDefault,
    #[serde(rename = "assistantModelEvaluation")]
    ModelEvaluation,
    #[serde(rename = "attackDiscoveryEnabled")]
    AttackDiscoveryEnabled,
}

impl AssistantFeatureKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantFeatureKey::KnowledgeBaseByDefault => "assistantKnowledgeBaseByDefault",
            AssistantFeatureKey::ModelEvaluation => "assistantModelEvaluation",
            AssistantFeatureKey::AttackDiscoveryEnabled => "attackDiscoveryEnabled",
        }
    }
}

impl fmt::Display for AssistantFeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantFeatureKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assistantKnowledgeBaseByDefault" => Ok(Self::KnowledgeBaseByDefault),
            "assistantModelEvaluation" => Ok(Self::ModelEvaluation),
            "attackDiscoveryEnabled" => Ok(Self::AttackDiscoveryEnabled),
            other => Err(ValidationError::invalid_format(
                "capability",
                format!("unknown assistant feature '{other}'"),
            )),
        }
    }
}

/// Feature flags registered for one plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantFeatures {
    #[serde(rename = "assistantKnowledgeBaseByDefault")]
    pub knowledge_base_by_default: bool,
    #[serde(rename = "assistantModelEvaluation")]
    pub model_evaluation: bool,
    pub attack_discovery_enabled: bool,
}

impl AssistantFeatures {
    /// Looks up a flag by key.
    pub fn is_enabled(&self, key: AssistantFeatureKey) -> bool {
        match key {
            AssistantFeatureKey::KnowledgeBaseByDefault => self.knowledge_base_by_default,
            AssistantFeatureKey::ModelEvaluation => self.model_evaluation,
            AssistantFeatureKey::AttackDiscoveryEnabled => self.attack_discovery_enabled,
        }
    }

    /// Returns a copy with one flag set.
    pub fn with(mut self, key: AssistantFeatureKey, enabled: bool) -> Self {
        match key {
            AssistantFeatureKey::KnowledgeBaseByDefault => self.knowledge_base_by_default = enabled,
            AssistantFeatureKey::ModelEvaluation => self.model_evaluation = enabled,
            AssistantFeatureKey::AttackDiscoveryEnabled => self.attack_discovery_enabled = enabled,
        }
        self
    }
}

/// A tool a plugin makes available to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantTool {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source_register: String,
}

impl AssistantTool {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            source_register: DEFAULT_PLUGIN_NAME.to_string(),
        }
    }
}

/// Drops tools that cannot run inside a conversation.
pub fn conversational_tools(tools: Vec<AssistantTool>) -> Vec<AssistantTool> {
    tools
        .into_iter()
        .filter(|t| t.id != ATTACK_DISCOVERY_TOOL_ID)
        .collect()
}

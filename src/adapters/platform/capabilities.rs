//! Static capability registry.
//!
//! Plugins register features and tools at startup; lookups afterwards are
//! read-only.

use std::collections::HashMap;

use crate::domain::capabilities::{
    AssistantFeatures, AssistantTool, ATTACK_DISCOVERY_TOOL_ID, DEFAULT_PLUGIN_NAME,
};
use crate::ports::CapabilityRegistry;

#[derive(Debug, Clone, Default)]
struct PluginCapabilities {
    features: AssistantFeatures,
    tools: Vec<AssistantTool>,
}

#[derive(Debug, Clone, Default)]
pub struct StaticCapabilityRegistry {
    plugins: HashMap<String, PluginCapabilities>,
}

impl StaticCapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_features(mut self, plugin_name: impl Into<String>, features: AssistantFeatures) -> Self {
        self.plugins.entry(plugin_name.into()).or_default().features = features;
        self
    }

    pub fn with_tools(
        mut self,
        plugin_name: impl Into<String>,
        tools: impl IntoIterator<Item = AssistantTool>,
    ) -> Self {
        let plugin_name = plugin_name.into();
        let entry = self.plugins.entry(plugin_name.clone()).or_default();
        entry.tools.extend(tools.into_iter().map(|mut t| {
            t.source_register = plugin_name.clone();
            t
        }));
        self
    }

    /// Registry with the security solution plugin's features and tools.
    pub fn security_solution(features: AssistantFeatures) -> Self {
        Self::new()
            .with_features(DEFAULT_PLUGIN_NAME, features)
            .with_tools(DEFAULT_PLUGIN_NAME, security_solution_tools())
    }
}

impl CapabilityRegistry for StaticCapabilityRegistry {
    fn registered_features(&self, plugin_name: &str) -> AssistantFeatures {
        self.plugins
            .get(plugin_name)
            .map(|p| p.features)
            .unwrap_or_default()
    }

    fn registered_tools(&self, plugin_name: &str) -> Vec<AssistantTool> {
        self.plugins
            .get(plugin_name)
            .map(|p| p.tools.clone())
            .unwrap_or_default()
    }
}

/// Tools the security solution registers.
pub fn security_solution_tools() -> Vec<AssistantTool> {
    vec![
        AssistantTool::new(
            "alert-counts-tool",
            "AlertCountsTool",
            "Call this for the counts of last 24 hours of open and acknowledged alerts in the environment, grouped by their severity and workflow status.",
        ),
        AssistantTool::new(
            "open-and-acknowledged-alerts-tool",
            "OpenAndAcknowledgedAlertsTool",
            "Call this for knowledge about the latest open and acknowledged alerts in the environment.",
        ),
        AssistantTool::new(
            "esql-knowledge-base-tool",
            "ESQLKnowledgeBaseTool",
            "Call this for knowledge on how to build an ESQL query, or answer questions about the ES|QL query language.",
        ),
        AssistantTool::new(
            "knowledge-base-retrieval-tool",
            "KnowledgeBaseRetrievalTool",
            "Call this for fetching details from the user's knowledge base.",
        ),
        AssistantTool::new(
            ATTACK_DISCOVERY_TOOL_ID,
            "AttackDiscoveryTool",
            "Call this for attack discoveries containing markdown syntax.",
        ),
    ]
}

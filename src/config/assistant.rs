//! Assistant configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::capabilities::DEFAULT_PLUGIN_NAME;
use crate::domain::licensing::LicenseType;

/// Assistant configuration: plugin defaults, license, actions API.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Plugin assumed when `x-kbn-context` is absent or unusable
    #[serde(default = "default_plugin_name")]
    pub default_plugin_name: String,

    /// License reported by the licensing service
    #[serde(default = "default_license_type")]
    pub license_type: LicenseType,

    /// Actions API base URL; connectors are unavailable when unset
    pub actions_base_url: Option<String>,

    /// API key sent to the actions API
    pub actions_api_key: Option<SecretString>,

    /// Actions API request timeout in seconds
    #[serde(default = "default_actions_timeout")]
    pub actions_timeout_secs: u64,

    /// Knowledge base index alias; no knowledge base is wired when unset
    pub knowledge_base_alias: Option<String>,

    /// ELSER model backing the knowledge base
    #[serde(default = "default_elser_model_id")]
    pub elser_model_id: String,
}

impl AssistantConfig {
    /// Get actions timeout as Duration
    pub fn actions_timeout(&self) -> Duration {
        Duration::from_secs(self.actions_timeout_secs)
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_plugin_name.trim().is_empty() {
            return Err(ValidationError::EmptyPluginName);
        }
        if let Some(url) = &self.actions_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidActionsUrl);
            }
            if self.actions_api_key.is_none() {
                return Err(ValidationError::MissingRequired("ASSISTANT__ACTIONS_API_KEY"));
            }
        }
        if self.actions_timeout_secs == 0 {
            return Err(ValidationError::InvalidActionsTimeout);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_plugin_name: default_plugin_name(),
            license_type: default_license_type(),
            actions_base_url: None,
            actions_api_key: None,
            actions_timeout_secs: default_actions_timeout(),
            knowledge_base_alias: None,
            elser_model_id: default_elser_model_id(),
        }
    }
}

fn default_plugin_name() -> String {
    DEFAULT_PLUGIN_NAME.to_string()
}

fn default_license_type() -> LicenseType {
    LicenseType::Enterprise
}

fn default_actions_timeout() -> u64 {
    120
}

fn default_elser_model_id() -> String {
    ".elser_model_2".to_string()
}

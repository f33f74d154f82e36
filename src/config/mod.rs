//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ASSISTANT_CONSOLE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use assistant_console::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! println!("Server running on {}", config.server.socket_addr()?);
//! # Ok(())
//! # }
//! ```

mod assistant;
mod auth;
mod error;
mod features;
mod server;

pub use assistant::AssistantConfig;
pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Assistant configuration (plugin defaults, license, actions API)
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Assistant feature flags for the default plugin
    #[serde(default)]
    pub features: FeatureFlags,

    /// Static bearer tokens
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ASSISTANT_CONSOLE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ASSISTANT_CONSOLE__SERVER__PORT=5601` -> `server.port = 5601`
    /// - `ASSISTANT_CONSOLE__ASSISTANT__ACTIONS_BASE_URL=...` -> `assistant.actions_base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ASSISTANT_CONSOLE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.assistant.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    use crate::domain::licensing::LicenseType;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "ASSISTANT_CONSOLE__SERVER__PORT",
        "ASSISTANT_CONSOLE__SERVER__ENVIRONMENT",
        "ASSISTANT_CONSOLE__ASSISTANT__LICENSE_TYPE",
        "ASSISTANT_CONSOLE__ASSISTANT__ACTIONS_BASE_URL",
        "ASSISTANT_CONSOLE__FEATURES__ASSISTANT_MODEL_EVALUATION",
        "ASSISTANT_CONSOLE__AUTH__STATIC_TOKENS",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5601);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.assistant.default_plugin_name, "securitySolutionUI");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ASSISTANT_CONSOLE__SERVER__PORT", "3000");
        env::set_var("ASSISTANT_CONSOLE__ASSISTANT__LICENSE_TYPE", "basic");
        env::set_var("ASSISTANT_CONSOLE__FEATURES__ASSISTANT_MODEL_EVALUATION", "true");
        env::set_var("ASSISTANT_CONSOLE__AUTH__STATIC_TOKENS", "abc:elastic");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.assistant.license_type, LicenseType::Basic);
        assert!(config.features.assistant_model_evaluation);
        assert_eq!(config.auth.static_tokens, "abc:elastic");
    }

    #[test]
    fn test_environment_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ASSISTANT_CONSOLE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.environment, Environment::Production);
        assert!(config.server.is_production());
    }

    #[test]
    fn test_validate_rejects_bad_actions_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("ASSISTANT_CONSOLE__ASSISTANT__ACTIONS_BASE_URL", "ftp://kibana");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidActionsUrl)
        ));
    }
}

//! Entity discovery (entity manager) enablement.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Reason reported when no entity discovery API key is stored.
pub const ERROR_API_KEY_NOT_FOUND: &str = "api_key_not_found";

/// Reason reported when the stored API key no longer authenticates.
pub const ERROR_API_KEY_NOT_VALID: &str = "api_key_not_valid";

/// Message returned by the ping route.
pub const PING_MESSAGE: &str = "Entity Manager OK";

/// API key entity discovery runs its background work with.
#[derive(Clone)]
pub struct EntityDiscoveryApiKey {
    pub id: String,
    pub name: String,
    pub api_key: SecretString,
}

impl EntityDiscoveryApiKey {
    pub fn new(id: impl Into<String>, name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// `id:api_key`, the credential pair used to act as the key.
    pub fn credentials(&self) -> String {
        format!("{}:{}", self.id, self.api_key.expose_secret())
    }
}

impl std::fmt::Debug for EntityDiscoveryApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDiscoveryApiKey")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Envelope returned by the disable route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnablementOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EnablementOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_the_key() {
        let key = EntityDiscoveryApiKey::new("k1", "entity discovery", "s3cret");
        let debug = format!("{key:?}");
        assert!(!debug.contains("s3cret"));
        assert_eq!(key.credentials(), "k1:s3cret");
    }

    #[test]
    fn outcome_omits_reason_on_success() {
        assert_eq!(
            serde_json::to_value(EnablementOutcome::success()).unwrap(),
            serde_json::json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(EnablementOutcome::failure(ERROR_API_KEY_NOT_FOUND)).unwrap(),
            serde_json::json!({ "success": false, "reason": "api_key_not_found" })
        );
    }
}

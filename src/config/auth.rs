//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Static bearer tokens, `token:username` pairs separated by commas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub static_tokens: String,
}

impl AuthConfig {
    /// Checks every non-blank entry has a token and a username.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let entries = self
            .static_tokens
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty());
        for (index, entry) in entries.enumerate() {
            let well_formed = entry
                .split_once(':')
                .map(|(token, username)| !token.trim().is_empty() && !username.trim().is_empty())
                .unwrap_or(false);
            if !well_formed {
                return Err(ValidationError::InvalidStaticTokens(format!(
                    "entry {index} is not token:username"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_valid() {
        assert!(AuthConfig::default().validate().is_ok());
    }

    #[test]
    fn test_valid_pairs() {
        let config = AuthConfig {
            static_tokens: "abc:elastic, def:analyst".to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_entry_without_separator_is_rejected() {
        let config = AuthConfig {
            static_tokens: "abc:elastic,secret".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidStaticTokens(_))
        ));
    }

    #[test]
    fn test_entry_without_username_is_rejected() {
        let config = AuthConfig {
            static_tokens: "abc:".to_string(),
        };
        assert!(config.validate().is_err());
    }
}

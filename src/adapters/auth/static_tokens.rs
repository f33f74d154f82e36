//! Static token session validator.
//!
//! Maps bearer tokens to users from a fixed table. Production wiring fills the
//! table from `auth.static_tokens` (`token:username` pairs separated by
//! commas); tests build it with the `with_*` helpers.
//!
//! # Example
//!
//! ```ignore
//! let validator = StaticSessionValidator::new()
//!     .with_test_user("valid-token", "elastic");
//!
//! let user = validator.validate("valid-token").await?;
//! assert_eq!(user.username, "elastic");
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, ValidationError};
use crate::ports::SessionValidator;

/// Session validator over a fixed token table.
///
/// Tokens not in the table return `InvalidToken`.
#[derive(Debug, Default)]
pub struct StaticSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl StaticSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `token:username[,token:username...]`.
    ///
    /// Blank entries are skipped. The username doubles as the user id.
    pub fn from_pairs(pairs: &str) -> Result<Self, ValidationError> {
        let validator = Self::new();
        for entry in pairs.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (token, username) = entry.split_once(':').ok_or_else(|| {
                ValidationError::invalid_format("auth.static_tokens", "expected token:username")
            })?;
            let (token, username) = (token.trim(), username.trim());
            if token.is_empty() {
                return Err(ValidationError::empty_field("auth.static_tokens"));
            }
            let user = AuthenticatedUser::new(UserId::new(username)?, username);
            validator.add_token(token, user);
        }
        Ok(validator)
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a token for a user whose id and username are both `username`.
    pub fn with_test_user(self, token: impl Into<String>, username: &str) -> Self {
        match UserId::new(username) {
            Ok(id) => self.with_user(token, AuthenticatedUser::new(id, username)),
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl SessionValidator for StaticSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

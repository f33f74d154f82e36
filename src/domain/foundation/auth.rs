//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what the session validator hands to request
//! handlers once a bearer token or API key checks out. Handlers only ever see
//! this type, never provider-specific claims.

use super::UserId;
use thiserror::Error;

/// The user on whose behalf a request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier (profile uid).
    pub id: UserId,

    /// Login name.
    pub username: String,

    /// Authentication realm the user came from, when known.
    pub realm: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            realm: None,
        }
    }

    /// Sets the authentication realm.
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or unknown.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The authentication service is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_builder_sets_realm() {
        let user = AuthenticatedUser::new(UserId::new("u_1").unwrap(), "elastic")
            .with_realm("reserved");
        assert_eq!(user.username, "elastic");
        assert_eq!(user.realm.as_deref(), Some("reserved"));
    }

    #[test]
    fn only_service_unavailable_is_transient() {
        assert!(AuthError::ServiceUnavailable("down".into()).is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
    }
}

//! Session validation port.
//!
//! HTTP middleware hands the raw credential from the `Authorization` header to
//! a `SessionValidator` and gets back the user the request runs as.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - Return `AuthError::InvalidToken` for unknown or malformed tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without its scheme prefix) and return the user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_validator_is_object_safe() {
        fn _accepts_dyn(_v: &dyn SessionValidator) {}
    }
}

//! Request authorization guard.
//!
//! Routes declare which checks they need; `perform_checks` runs them in a
//! fixed order (license, authenticated user, capability) and stops at the
//! first failure.

use crate::domain::capabilities::AssistantFeatureKey;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::licensing::{has_ai_assistant_license, License, UPGRADE_LICENSE_MESSAGE};
use crate::ports::CapabilityRegistry;

/// Which checks a route requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequiredChecks {
    pub license: bool,
    pub authenticated_user: bool,
    pub capability: Option<AssistantFeatureKey>,
}

impl RequiredChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn license(mut self) -> Self {
        self.license = true;
        self
    }

    pub fn authenticated_user(mut self) -> Self {
        self.authenticated_user = true;
        self
    }

    pub fn capability(mut self, key: AssistantFeatureKey) -> Self {
        self.capability = Some(key);
        self
    }
}

/// What the checks are evaluated against.
pub struct CheckContext<'a> {
    pub license: License,
    pub current_user: Option<&'a AuthenticatedUser>,
    /// Plugin the request originates from.
    pub plugin_name: &'a str,
    pub capabilities: &'a dyn CapabilityRegistry,
}

/// The first check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFailure {
    LicenseInsufficient,
    Unauthenticated,
    CapabilityMissing(AssistantFeatureKey),
}

impl CheckFailure {
    /// HTTP status the failure is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            CheckFailure::LicenseInsufficient => 403,
            CheckFailure::Unauthenticated => 401,
            CheckFailure::CapabilityMissing(_) => 404,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CheckFailure::LicenseInsufficient => UPGRADE_LICENSE_MESSAGE,
            CheckFailure::Unauthenticated => "Authenticated user not found",
            CheckFailure::CapabilityMissing(_) => "Not Found",
        }
    }
}

/// Runs the requested checks. `None` means the request may proceed.
pub fn perform_checks(checks: RequiredChecks, ctx: &CheckContext<'_>) -> Option<CheckFailure> {
    if checks.license && !has_ai_assistant_license(&ctx.license) {
        return Some(CheckFailure::LicenseInsufficient);
    }

    if checks.authenticated_user && ctx.current_user.is_none() {
        return Some(CheckFailure::Unauthenticated);
    }

    if let Some(key) = checks.capability {
        if !ctx
            .capabilities
            .registered_features(ctx.plugin_name)
            .is_enabled(key)
        {
            return Some(CheckFailure::CapabilityMissing(key));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::platform::StaticCapabilityRegistry;
    use crate::domain::capabilities::{AssistantFeatures, DEFAULT_PLUGIN_NAME};
    use crate::domain::foundation::UserId;
    use crate::domain::licensing::LicenseType;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("u1").unwrap(), "elastic")
    }

    fn registry(model_evaluation: bool) -> StaticCapabilityRegistry {
        StaticCapabilityRegistry::new().with_features(
            DEFAULT_PLUGIN_NAME,
            AssistantFeatures::default().with(AssistantFeatureKey::ModelEvaluation, model_evaluation),
        )
    }

    fn all_checks() -> RequiredChecks {
        RequiredChecks::new()
            .license()
            .authenticated_user()
            .capability(AssistantFeatureKey::ModelEvaluation)
    }

    #[test]
    fn no_checks_always_pass() {
        let registry = registry(false);
        let ctx = CheckContext {
            license: License::active(LicenseType::Basic),
            current_user: None,
            plugin_name: DEFAULT_PLUGIN_NAME,
            capabilities: &registry,
        };
        assert_eq!(perform_checks(RequiredChecks::new(), &ctx), None);
    }

    #[test]
    fn license_failure_wins_over_everything() {
        let registry = registry(false);
        let ctx = CheckContext {
            license: License::active(LicenseType::Gold),
            current_user: None,
            plugin_name: DEFAULT_PLUGIN_NAME,
            capabilities: &registry,
        };
        let failure = perform_checks(all_checks(), &ctx).unwrap();
        assert_eq!(failure, CheckFailure::LicenseInsufficient);
        assert_eq!(failure.status_code(), 403);
        assert_eq!(failure.message(), UPGRADE_LICENSE_MESSAGE);
    }

    #[test]
    fn missing_user_is_401() {
        let registry = registry(false);
        let ctx = CheckContext {
            license: License::active(LicenseType::Enterprise),
            current_user: None,
            plugin_name: DEFAULT_PLUGIN_NAME,
            capabilities: &registry,
        };
        let failure = perform_checks(all_checks(), &ctx).unwrap();
        assert_eq!(failure.status_code(), 401);
        assert_eq!(failure.message(), "Authenticated user not found");
    }

    #[test]
    fn missing_capability_is_404() {
        let registry = registry(false);
        let user = user();
        let ctx = CheckContext {
            license: License::active(LicenseType::Trial),
            current_user: Some(&user),
            plugin_name: DEFAULT_PLUGIN_NAME,
            capabilities: &registry,
        };
        let failure = perform_checks(all_checks(), &ctx).unwrap();
        assert_eq!(
            failure,
            CheckFailure::CapabilityMissing(AssistantFeatureKey::ModelEvaluation)
        );
        assert_eq!(failure.status_code(), 404);
    }

    #[test]
    fn capability_is_resolved_for_requesting_plugin() {
        let registry = registry(true);
        let user = user();
        let ctx = CheckContext {
            license: License::active(LicenseType::Enterprise),
            current_user: Some(&user),
            plugin_name: "observabilityAIAssistant",
            capabilities: &registry,
        };
        assert!(perform_checks(all_checks(), &ctx).is_some());

        let ctx = CheckContext {
            plugin_name: DEFAULT_PLUGIN_NAME,
            ..ctx
        };
        assert_eq!(perform_checks(all_checks(), &ctx), None);
    }

    #[test]
    fn unchecked_flags_are_ignored() {
        let registry = registry(false);
        let ctx = CheckContext {
            license: License::active(LicenseType::Basic),
            current_user: None,
            plugin_name: DEFAULT_PLUGIN_NAME,
            capabilities: &registry,
        };
        let checks = RequiredChecks::new().authenticated_user();
        assert_eq!(perform_checks(checks, &ctx), Some(CheckFailure::Unauthenticated));
    }
}

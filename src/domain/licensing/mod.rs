//! License levels and the assistant's minimum license.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// License level the AI assistant requires.
pub const MINIMUM_AI_ASSISTANT_LICENSE: LicenseType = LicenseType::Enterprise;

/// Body of the 403 returned when the license is too low.
pub const UPGRADE_LICENSE_MESSAGE: &str =
    "Your license does not support AI Assistant. Please upgrade your license.";

/// Stack license level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    Basic,
    Standard,
    Gold,
    Platinum,
    Enterprise,
    Trial,
}

impl LicenseType {
    /// Rank used for `has_at_least` comparisons. Trial unlocks everything.
    fn rank(&self) -> u8 {
        match self {
            LicenseType::Basic => 0,
            LicenseType::Standard => 1,
            LicenseType::Gold => 2,
            LicenseType::Platinum => 3,
            LicenseType::Enterprise | LicenseType::Trial => 4,
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LicenseType::Basic => "basic",
            LicenseType::Standard => "standard",
            LicenseType::Gold => "gold",
            LicenseType::Platinum => "platinum",
            LicenseType::Enterprise => "enterprise",
            LicenseType::Trial => "trial",
        };
        f.write_str(s)
    }
}

impl FromStr for LicenseType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(LicenseType::Basic),
            "standard" => Ok(LicenseType::Standard),
            "gold" => Ok(LicenseType::Gold),
            "platinum" => Ok(LicenseType::Platinum),
            "enterprise" => Ok(LicenseType::Enterprise),
            "trial" => Ok(LicenseType::Trial),
            other => Err(ValidationError::invalid_format(
                "license_type",
                format!("unknown license type '{other}'"),
            )),
        }
    }
}

/// Whether the license is currently in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    Active,
    Expired,
    Invalid,
}

/// The license reported by the licensing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub license_type: LicenseType,
    pub status: LicenseStatus,
}

impl License {
    /// An active license of the given type.
    pub fn active(license_type: LicenseType) -> Self {
        Self {
            license_type,
            status: LicenseStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LicenseStatus::Active
    }

    /// True when the license is active and at or above `minimum`.
    pub fn has_at_least(&self, minimum: LicenseType) -> bool {
        self.is_active() && self.license_type.rank() >= minimum.rank()
    }
}

/// True when the license unlocks the AI assistant.
pub fn has_ai_assistant_license(license: &License) -> bool {
    license.has_at_least(MINIMUM_AI_ASSISTANT_LICENSE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enterprise_and_trial_unlock_assistant() {
        assert!(has_ai_assistant_license(&License::active(LicenseType::Enterprise)));
        assert!(has_ai_assistant_license(&License::active(LicenseType::Trial)));
    }

    #[test]
    fn lower_tiers_do_not_unlock_assistant() {
        for t in [
            LicenseType::Basic,
            LicenseType::Standard,
            LicenseType::Gold,
            LicenseType::Platinum,
        ] {
            assert!(!has_ai_assistant_license(&License::active(t)), "{t}");
        }
    }

    #[test]
    fn expired_license_fails_every_check() {
        let license = License {
            license_type: LicenseType::Enterprise,
            status: LicenseStatus::Expired,
        };
        assert!(!license.has_at_least(LicenseType::Basic));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Platinum".parse::<LicenseType>().unwrap(), LicenseType::Platinum);
        assert!("diamond".parse::<LicenseType>().is_err());
    }
}

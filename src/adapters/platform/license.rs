//! Static licensing service.

use std::sync::{PoisonError, RwLock};

use crate::domain::licensing::License;
use crate::ports::LicensingService;

/// Reports a license fixed at startup. Tests may swap it with `set_license`.
#[derive(Debug)]
pub struct StaticLicensingService {
    license: RwLock<License>,
}

impl StaticLicensingService {
    pub fn new(license: License) -> Self {
        Self {
            license: RwLock::new(license),
        }
    }

    pub fn set_license(&self, license: License) {
        *self.license.write().unwrap_or_else(PoisonError::into_inner) = license;
    }
}

impl LicensingService for StaticLicensingService {
    fn current_license(&self) -> License {
        *self.license.read().unwrap_or_else(PoisonError::into_inner)
    }
}

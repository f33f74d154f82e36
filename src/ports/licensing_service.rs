//! Licensing port.

use crate::domain::licensing::License;

/// Reports the license the deployment currently runs under.
pub trait LicensingService: Send + Sync {
    fn current_license(&self) -> License;
}

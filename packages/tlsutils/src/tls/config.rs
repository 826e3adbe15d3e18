//! Issuance defaults
//!
//! Validity and key choices that used to be baked into issuance live here so
//! callers can override them per deployment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::KeyAlgorithm;

const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Validity applied to generated certificates unless the options say otherwise
pub const DEFAULT_VALIDITY_DAYS: u32 = 45;

/// Window before `not_after` in which expiry checks start warning
pub const DEFAULT_EXPIRY_WARNING_DAYS: u32 = 30;

/// `DEFAULT_VALIDITY_DAYS` as a `Duration`
pub const DEFAULT_VALIDITY: Duration =
    Duration::from_secs(DEFAULT_VALIDITY_DAYS as u64 * SECONDS_PER_DAY);

/// Defaults used when building `X509CreateCertificateOptions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateDefaults {
    pub validity_days: u32,
    pub key_algorithm: KeyAlgorithm,
    pub expiry_warning_days: u32,
}

impl Default for CertificateDefaults {
    fn default() -> Self {
        Self {
            validity_days: DEFAULT_VALIDITY_DAYS,
            key_algorithm: KeyAlgorithm::default(),
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
        }
    }
}

impl CertificateDefaults {
    #[must_use]
    pub fn validity(&self) -> Duration {
        days(self.validity_days)
    }

    #[must_use]
    pub fn expiry_warning(&self) -> Duration {
        days(self.expiry_warning_days)
    }
}

/// Convert whole days to a `Duration`
#[must_use]
pub fn days(count: u32) -> Duration {
    Duration::from_secs(u64::from(count) * SECONDS_PER_DAY)
}

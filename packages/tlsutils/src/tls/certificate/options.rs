//! Certificate creation options

use std::net::IpAddr;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::tls::config::CertificateDefaults;
use crate::tls::errors::{Result, TlsError};
use crate::tls::types::KeyAlgorithm;

/// Subject, serial, SAN and key parameters for one issuance call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct X509CreateCertificateOptions {
    pub common_name: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub organizational_unit: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    /// Two-letter ISO 3166 code
    #[serde(default)]
    pub country: Option<String>,
    /// Generated when unset
    #[serde(default)]
    pub serial_number: Option<u128>,
    #[serde(default)]
    pub additional_sans: Vec<String>,
    #[serde(default)]
    pub key_algorithm: KeyAlgorithm,
    pub validity: Duration,
    /// Defaults to the time of issuance
    #[serde(default)]
    pub not_before: Option<SystemTime>,
}

impl X509CreateCertificateOptions {
    /// Options for `common_name` with the stock defaults
    #[must_use]
    pub fn new(common_name: &str) -> Self {
        Self::with_defaults(common_name, &CertificateDefaults::default())
    }

    #[must_use]
    pub fn with_defaults(common_name: &str, defaults: &CertificateDefaults) -> Self {
        Self {
            common_name: common_name.to_string(),
            organization: None,
            organizational_unit: None,
            locality: None,
            province: None,
            country: None,
            serial_number: None,
            additional_sans: Vec::new(),
            key_algorithm: defaults.key_algorithm,
            validity: defaults.validity(),
            not_before: None,
        }
    }

    #[must_use]
    pub fn with_organization(self, organization: &str) -> Self {
        Self {
            organization: Some(organization.to_string()),
            ..self
        }
    }

    #[must_use]
    pub fn with_organizational_unit(self, unit: &str) -> Self {
        Self {
            organizational_unit: Some(unit.to_string()),
            ..self
        }
    }

    #[must_use]
    pub fn with_locality(self, locality: &str) -> Self {
        Self {
            locality: Some(locality.to_string()),
            ..self
        }
    }

    #[must_use]
    pub fn with_province(self, province: &str) -> Self {
        Self {
            province: Some(province.to_string()),
            ..self
        }
    }

    #[must_use]
    pub fn with_country(self, country: &str) -> Self {
        Self {
            country: Some(country.to_string()),
            ..self
        }
    }

    #[must_use]
    pub fn with_serial_number(self, serial_number: u128) -> Self {
        Self {
            serial_number: Some(serial_number),
            ..self
        }
    }

    #[must_use]
    pub fn with_additional_san(mut self, san: &str) -> Self {
        self.additional_sans.push(san.to_string());
        self
    }

    #[must_use]
    pub fn with_key_algorithm(self, key_algorithm: KeyAlgorithm) -> Self {
        Self {
            key_algorithm,
            ..self
        }
    }

    #[must_use]
    pub fn with_validity(self, validity: Duration) -> Self {
        Self { validity, ..self }
    }

    #[must_use]
    pub fn with_not_before(self, not_before: SystemTime) -> Self {
        Self {
            not_before: Some(not_before),
            ..self
        }
    }

    /// Check every field; the first problem found is reported
    pub fn validate(&self) -> Result<()> {
        if self.common_name.trim().is_empty() {
            return Err(TlsError::InvalidOptions(
                "common name must not be empty".to_string(),
            ));
        }

        for (field, value) in [
            ("organization", &self.organization),
            ("organizational unit", &self.organizational_unit),
            ("locality", &self.locality),
            ("province", &self.province),
        ] {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                return Err(TlsError::InvalidOptions(format!(
                    "{field} is set but empty"
                )));
            }
        }

        if let Some(country) = &self.country
            && (country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(TlsError::InvalidOptions(format!(
                "country must be a two-letter code, got '{country}'"
            )));
        }

        if self.serial_number == Some(0) {
            return Err(TlsError::InvalidOptions(
                "serial number must be positive".to_string(),
            ));
        }

        if self.validity.is_zero() {
            return Err(TlsError::InvalidOptions(
                "validity period must be positive".to_string(),
            ));
        }

        for san in &self.additional_sans {
            if !is_valid_san(san) {
                return Err(TlsError::InvalidOptions(format!(
                    "'{san}' is neither an IP address nor a DNS name"
                )));
            }
        }

        self.key_algorithm.check_supported()
    }
}

/// IP literal or DNS name (a leading `*.` wildcard label is allowed)
pub(crate) fn is_valid_san(san: &str) -> bool {
    san.parse::<IpAddr>().is_ok() || is_dns_name(san)
}

pub(crate) fn is_dns_name(name: &str) -> bool {
    let name = name.strip_prefix("*.").unwrap_or(name);
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

//! Core `CertificateBuilder` structure and subject/validity setters
//!
//! The builder carries its issuance state in the type: root CA and
//! self-signed builders can `create()` immediately, while intermediate and
//! end-entity builders must be given an issuer with `signed_by` first.

use std::time::{Duration, SystemTime};

use infrakit_tlsutils::tls::{
    CertKeyPair, CertificateDefaults, KeyAlgorithm, X509CreateCertificateOptions,
};

/// Which kind of certificate the builder issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateRole {
    /// Self-signed CA anchoring a chain
    RootCa,
    /// CA signed by another CA
    Intermediate,
    /// Leaf certificate for a service
    EndEntity,
    /// Leaf certificate signed by its own key
    SelfSigned,
}

/// State marker: the certificate signs itself
#[derive(Debug, Clone, Copy)]
pub struct SelfIssued;

/// State marker: an issuer is still required
#[derive(Debug, Clone, Copy)]
pub struct IssuerNotSet;

/// State marker: the issuing CA has been chosen
#[derive(Debug, Clone, Copy)]
pub struct IssuerSet<'a> {
    pub(crate) issuer: &'a CertKeyPair,
}

/// Fluent builder over `X509CreateCertificateOptions`
#[derive(Debug, Clone)]
pub struct CertificateBuilder<S> {
    pub(crate) role: CertificateRole,
    pub(crate) options: X509CreateCertificateOptions,
    pub(crate) state: S,
}

impl<S> CertificateBuilder<S> {
    pub(crate) fn with_role(role: CertificateRole, common_name: &str, state: S) -> Self {
        Self {
            role,
            options: X509CreateCertificateOptions::new(common_name),
            state,
        }
    }

    /// Apply the validity and key algorithm from `defaults`
    #[must_use]
    pub fn defaults(self, defaults: &CertificateDefaults) -> Self {
        Self {
            options: self
                .options
                .with_validity(defaults.validity())
                .with_key_algorithm(defaults.key_algorithm),
            ..self
        }
    }

    #[must_use]
    pub fn organization(self, organization: &str) -> Self {
        Self {
            options: self.options.with_organization(organization),
            ..self
        }
    }

    #[must_use]
    pub fn organizational_unit(self, unit: &str) -> Self {
        Self {
            options: self.options.with_organizational_unit(unit),
            ..self
        }
    }

    #[must_use]
    pub fn locality(self, locality: &str) -> Self {
        Self {
            options: self.options.with_locality(locality),
            ..self
        }
    }

    #[must_use]
    pub fn province(self, province: &str) -> Self {
        Self {
            options: self.options.with_province(province),
            ..self
        }
    }

    #[must_use]
    pub fn country(self, country: &str) -> Self {
        Self {
            options: self.options.with_country(country),
            ..self
        }
    }

    #[must_use]
    pub fn serial_number(self, serial_number: u128) -> Self {
        Self {
            options: self.options.with_serial_number(serial_number),
            ..self
        }
    }

    /// Add a DNS name or IP address to the SAN extension
    #[must_use]
    pub fn san(self, san: &str) -> Self {
        Self {
            options: self.options.with_additional_san(san),
            ..self
        }
    }

    #[must_use]
    pub fn key_algorithm(self, key_algorithm: KeyAlgorithm) -> Self {
        Self {
            options: self.options.with_key_algorithm(key_algorithm),
            ..self
        }
    }

    #[must_use]
    pub fn valid_for(self, validity: Duration) -> Self {
        Self {
            options: self.options.with_validity(validity),
            ..self
        }
    }

    #[must_use]
    pub fn valid_for_days(self, days: u32) -> Self {
        self.valid_for(infrakit_tlsutils::tls::config::days(days))
    }

    #[must_use]
    pub fn not_before(self, not_before: SystemTime) -> Self {
        Self {
            options: self.options.with_not_before(not_before),
            ..self
        }
    }

    #[must_use]
    pub fn role(&self) -> CertificateRole {
        self.role
    }

    /// The options `create()` will issue with
    #[must_use]
    pub fn options(&self) -> &X509CreateCertificateOptions {
        &self.options
    }
}

//! X.509 Builder API modules
//!
//! Provides the fluent API for issuing certificates with method chaining.

pub mod core;
pub mod issue;

pub use self::core::*;

/// Main entry point for certificate issuance
pub struct X509;

impl X509 {
    /// Self-signed CA certificate
    #[must_use]
    pub fn root_ca(common_name: &str) -> CertificateBuilder<SelfIssued> {
        CertificateBuilder::with_role(CertificateRole::RootCa, common_name, SelfIssued)
    }

    /// CA certificate; call `signed_by` with the parent CA before `create`
    #[must_use]
    pub fn intermediate(common_name: &str) -> CertificateBuilder<IssuerNotSet> {
        CertificateBuilder::with_role(CertificateRole::Intermediate, common_name, IssuerNotSet)
    }

    /// Service certificate; call `signed_by` with the issuing CA before `create`
    #[must_use]
    pub fn end_entity(common_name: &str) -> CertificateBuilder<IssuerNotSet> {
        CertificateBuilder::with_role(CertificateRole::EndEntity, common_name, IssuerNotSet)
    }

    /// Service certificate signed by its own key
    #[must_use]
    pub fn self_signed(common_name: &str) -> CertificateBuilder<SelfIssued> {
        CertificateBuilder::with_role(CertificateRole::SelfSigned, common_name, SelfIssued)
    }
}

//! Terminal `create()` methods for each builder state

use infrakit_tlsutils::tls::{
    CertKeyPair, TlsError, create_root_ca_certificate, create_self_signed_certificate,
    create_signed_end_entity_certificate, create_signed_intermediate_certificate,
};

use super::core::{CertificateBuilder, CertificateRole, IssuerNotSet, IssuerSet, SelfIssued};

impl CertificateBuilder<SelfIssued> {
    /// Issue the root CA or self-signed certificate
    pub fn create(self) -> Result<CertKeyPair, TlsError> {
        match self.role {
            CertificateRole::RootCa => create_root_ca_certificate(&self.options),
            _ => create_self_signed_certificate(&self.options),
        }
    }
}

impl CertificateBuilder<IssuerNotSet> {
    /// Choose the CA that signs this certificate
    #[must_use]
    pub fn signed_by(self, issuer: &CertKeyPair) -> CertificateBuilder<IssuerSet<'_>> {
        CertificateBuilder {
            role: self.role,
            options: self.options,
            state: IssuerSet { issuer },
        }
    }
}

impl CertificateBuilder<IssuerSet<'_>> {
    /// Issue the intermediate or end-entity certificate
    pub fn create(self) -> Result<CertKeyPair, TlsError> {
        let issuer = self.state.issuer;
        match self.role {
            CertificateRole::Intermediate => {
                create_signed_intermediate_certificate(&self.options, issuer)
            }
            _ => create_signed_end_entity_certificate(&self.options, issuer),
        }
    }
}

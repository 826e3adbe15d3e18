//! Stateless certificate predicates and transforms

use std::time::Duration;

use rand::Rng;
use rustls::RootCertStore;
use rustls::client::verify_server_cert_signed_by_trust_anchor;
use rustls::pki_types::{CertificateDer, UnixTime};
use rustls::server::ParsedCertificate as WebPkiCertificate;

use super::parser::{Certificate, parse_certificates_from_pem};
use crate::tls::errors::{Result, TlsError};
use crate::tls::key::PrivateKey;

/// Lower bound (exclusive) for generated serial numbers
pub const SERIAL_NUMBER_FLOOR: u128 = 1 << 24;

/// Upper bound (exclusive); keeps the DER INTEGER positive in 16 bytes
pub const SERIAL_NUMBER_CEILING: u128 = 1 << 127;

/// Self-signed CA certificate
#[must_use]
pub fn is_certificate_root_ca(cert: &Certificate) -> bool {
    cert.is_ca() && is_self_signed_certificate(cert)
}

/// CA certificate issued by some other CA
#[must_use]
pub fn is_intermediate_certificate(cert: &Certificate) -> bool {
    cert.is_ca() && !is_self_signed_certificate(cert)
}

#[must_use]
pub fn is_end_entity_certificate(cert: &Certificate) -> bool {
    !cert.is_ca()
}

/// Subject equals issuer and the signature verifies under the certificate's own key
#[must_use]
pub fn is_self_signed_certificate(cert: &Certificate) -> bool {
    if !cert.has_matching_subject_and_issuer() {
        return false;
    }
    match cert.x509() {
        Ok(x509) => x509.verify_signature(None).is_ok(),
        Err(_) => false,
    }
}

/// `cert` names `issuer` as its issuer and carries a signature made by `issuer`'s key
#[must_use]
pub fn is_cert_signed_by(cert: &Certificate, issuer: &Certificate) -> bool {
    if cert.parsed().issuer_der != issuer.parsed().subject_der {
        return false;
    }

    let (Ok(child), Ok(parent)) = (cert.x509(), issuer.x509()) else {
        return false;
    };
    match child.verify_signature(Some(parent.public_key())) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("Signature check against issuer failed: {}", e);
            false
        }
    }
}

/// Whether `key` is the private half of the certificate's public key
pub fn is_certificate_matching_private_key(cert: &Certificate, key: &PrivateKey) -> Result<bool> {
    let x509 = cert.x509()?;
    let cert_public_key: &[u8] = &x509.public_key().subject_public_key.data;
    Ok(cert_public_key == key.public_key_raw()?.as_slice())
}

/// Length of the validity window, `not_after - not_before`
///
/// A window whose end precedes its start yields zero.
#[must_use]
pub fn get_validity_duration(cert: &Certificate) -> Duration {
    cert.not_after()
        .duration_since(cert.not_before())
        .unwrap_or_default()
}

#[must_use]
pub fn encode_certificate_as_pem_string(cert: &Certificate) -> String {
    cert.to_pem()
}

/// Load a PEM string holding exactly one certificate
pub fn load_certificate_from_pem_string(pem: &str) -> Result<Certificate> {
    if pem.trim().is_empty() {
        return Err(TlsError::InvalidInput("certificate PEM is empty".to_string()));
    }
    Certificate::from_pem(pem)
}

/// Load every certificate in a PEM bundle, preserving order
pub fn load_certificates_from_pem_string(pem: &str) -> Result<Vec<Certificate>> {
    if pem.trim().is_empty() {
        return Err(TlsError::InvalidInput("certificate PEM is empty".to_string()));
    }
    parse_certificates_from_pem(pem)
}

#[must_use]
pub fn encode_certificate_as_der(cert: &Certificate) -> Vec<u8> {
    cert.der().to_vec()
}

pub fn load_certificate_from_der(der: &[u8]) -> Result<Certificate> {
    Certificate::from_der(der)
}

/// Random serial in `(SERIAL_NUMBER_FLOOR, SERIAL_NUMBER_CEILING)`
#[must_use]
pub fn generate_certificate_serial_number() -> u128 {
    rand::rng().random_range(SERIAL_NUMBER_FLOOR + 1..SERIAL_NUMBER_CEILING)
}

/// Validate `leaf` up to one of `roots` through the webpki path builder
///
/// Any failure to find a trusted path is reported as
/// `TlsError::NoValidCertificateChain`.
pub fn verify_certificate_chain(
    leaf: &Certificate,
    intermediates: &[Certificate],
    roots: &[Certificate],
) -> Result<()> {
    if roots.is_empty() {
        return Err(TlsError::InvalidInput(
            "at least one trusted root certificate is required".to_string(),
        ));
    }

    let mut root_store = RootCertStore::empty();
    for root in roots {
        root_store.add(root.der().clone()).map_err(|e| {
            TlsError::CertificateValidation(format!("Unusable trust anchor: {e}"))
        })?;
    }

    let end_entity = WebPkiCertificate::try_from(leaf.der()).map_err(|e| {
        TlsError::NoValidCertificateChain(format!("end-entity certificate rejected: {e}"))
    })?;
    let intermediate_ders: Vec<CertificateDer<'static>> =
        intermediates.iter().map(|c| c.der().clone()).collect();

    let algorithms = rustls::crypto::ring::default_provider().signature_verification_algorithms;

    verify_server_cert_signed_by_trust_anchor(
        &end_entity,
        &root_store,
        &intermediate_ders,
        UnixTime::now(),
        algorithms.all,
    )
    .map_err(|e| TlsError::NoValidCertificateChain(e.to_string()))
}

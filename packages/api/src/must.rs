//! Panic-on-error adapters for command-line callers
//!
//! Every function here wraps a `Result`-returning operation and panics with
//! the error message on failure. They exist so one-shot CLI tools can stay
//! terse; library code should call the fallible functions directly.

use infrakit_tlsutils::tls::{
    self, CertKeyPair, Certificate, PrivateKey, X509CreateCertificateOptions,
};

fn must<T>(operation: &str, result: tls::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("{} failed: {}", operation, e);
            panic!("{operation} failed: {e}")
        }
    }
}

#[must_use]
pub fn must_create_root_ca_certificate(options: &X509CreateCertificateOptions) -> CertKeyPair {
    must(
        "create_root_ca_certificate",
        tls::create_root_ca_certificate(options),
    )
}

#[must_use]
pub fn must_create_signed_intermediate_certificate(
    options: &X509CreateCertificateOptions,
    issuer: &CertKeyPair,
) -> CertKeyPair {
    must(
        "create_signed_intermediate_certificate",
        tls::create_signed_intermediate_certificate(options, issuer),
    )
}

#[must_use]
pub fn must_create_signed_end_entity_certificate(
    options: &X509CreateCertificateOptions,
    issuer: &CertKeyPair,
) -> CertKeyPair {
    must(
        "create_signed_end_entity_certificate",
        tls::create_signed_end_entity_certificate(options, issuer),
    )
}

#[must_use]
pub fn must_create_self_signed_certificate(options: &X509CreateCertificateOptions) -> CertKeyPair {
    must(
        "create_self_signed_certificate",
        tls::create_self_signed_certificate(options),
    )
}

#[must_use]
pub fn must_generate_private_key(algorithm: tls::KeyAlgorithm) -> PrivateKey {
    must("generate_private_key", tls::generate_private_key(algorithm))
}

#[must_use]
pub fn must_load_certificate_from_pem_string(pem: &str) -> Certificate {
    must(
        "load_certificate_from_pem_string",
        tls::load_certificate_from_pem_string(pem),
    )
}

pub fn must_check_certificate_chain_string(chain: &str) {
    must(
        "check_certificate_chain_string",
        tls::check_certificate_chain_string(chain),
    );
}

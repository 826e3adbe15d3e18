//! Certificate chain checking

use tracing::info;

use super::parser::Certificate;
use super::parsing::{check_certificate_expiry, validate_basic_constraints};
use super::utils::{
    is_cert_signed_by, is_certificate_root_ca, load_certificates_from_pem_string,
    verify_certificate_chain,
};
use crate::tls::errors::{Result, TlsError};

/// End-entity, intermediate, root
pub const EXPECTED_CHAIN_LENGTH: usize = 3;

/// Validate a PEM bundle holding exactly an end-entity, an intermediate and a
/// root certificate, in that order
///
/// The root is the only trust anchor and the intermediate the only candidate
/// intermediate, so at most one path exists; it must run through the
/// certificates in the order given.
pub fn check_certificate_chain_string(chain: &str) -> Result<()> {
    let certs = if chain.trim().is_empty() {
        Vec::new()
    } else {
        load_certificates_from_pem_string(chain)?
    };

    let [end_entity, intermediate, root] = certs.as_slice() else {
        return Err(TlsError::ChainLength {
            expected: EXPECTED_CHAIN_LENGTH,
            found: certs.len(),
        });
    };

    for cert in [end_entity, intermediate, root] {
        check_certificate_expiry(cert)?;
    }

    verify_certificate_chain(
        end_entity,
        std::slice::from_ref(intermediate),
        std::slice::from_ref(root),
    )?;

    check_chain_order(end_entity, intermediate, root)?;

    info!(
        "Certificate chain validation successful for '{}'",
        end_entity.parsed().common_name().unwrap_or("<unnamed>")
    );
    Ok(())
}

/// The verified path must be exactly end-entity -> intermediate -> root
fn check_chain_order(
    end_entity: &Certificate,
    intermediate: &Certificate,
    root: &Certificate,
) -> Result<()> {
    validate_basic_constraints(end_entity, false)
        .and_then(|()| validate_basic_constraints(intermediate, true))
        .map_err(|e| TlsError::NoValidCertificateChain(e.to_string()))?;

    if !is_certificate_root_ca(root) {
        return Err(TlsError::NoValidCertificateChain(
            "last certificate is not a self-signed root CA".to_string(),
        ));
    }
    if !is_cert_signed_by(end_entity, intermediate) {
        return Err(TlsError::NoValidCertificateChain(
            "end-entity certificate was not issued by the intermediate".to_string(),
        ));
    }
    if !is_cert_signed_by(intermediate, root) {
        return Err(TlsError::NoValidCertificateChain(
            "intermediate certificate was not issued by the root".to_string(),
        ));
    }
    Ok(())
}

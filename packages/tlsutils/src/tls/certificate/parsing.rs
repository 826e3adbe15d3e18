//! Time and constraint checks over parsed certificates

use std::time::{Duration, SystemTime};

use super::parser::Certificate;
use crate::tls::config::CertificateDefaults;
use crate::tls::errors::{Result, TlsError};

/// Reject certificates that are not yet valid or already expired
pub fn check_certificate_expiry(cert: &Certificate) -> Result<()> {
    check_certificate_expiry_at(
        cert,
        SystemTime::now(),
        CertificateDefaults::default().expiry_warning(),
    )
}

/// Expiry check against an explicit clock and warning window
pub fn check_certificate_expiry_at(
    cert: &Certificate,
    now: SystemTime,
    warning_window: Duration,
) -> Result<()> {
    let parsed = cert.parsed();
    let name = parsed.common_name().unwrap_or("<unnamed>");

    // Check if certificate is not yet valid
    if now < parsed.not_before {
        return Err(TlsError::CertificateExpired(format!(
            "Certificate '{name}' is not yet valid (not before: {:?}, current time: {:?})",
            parsed.not_before, now
        )));
    }

    // Check if certificate is expired
    if now > parsed.not_after {
        return Err(TlsError::CertificateExpired(format!(
            "Certificate '{name}' has expired (not after: {:?}, current time: {:?})",
            parsed.not_after, now
        )));
    }

    if let Ok(remaining) = parsed.not_after.duration_since(now)
        && remaining < warning_window
    {
        tracing::warn!(
            "Certificate '{}' expires soon: {} days remaining (expires: {:?})",
            name,
            remaining.as_secs() / (24 * 3600),
            parsed.not_after
        );
    }

    Ok(())
}

/// Check the BasicConstraints CA flag, and keyCertSign for CAs
pub fn validate_basic_constraints(cert: &Certificate, expected_ca: bool) -> Result<()> {
    let parsed = cert.parsed();
    if parsed.is_ca != expected_ca {
        return Err(TlsError::CertificateValidation(if expected_ca {
            "Certificate is not a valid CA certificate (BasicConstraints CA=false)".to_string()
        } else {
            "End-entity certificate incorrectly marked as CA (BasicConstraints CA=true)"
                .to_string()
        }));
    }

    // An absent KeyUsage extension places no restriction
    if expected_ca
        && !parsed.key_usage.is_empty()
        && !parsed.key_usage.iter().any(|usage| usage == "keyCertSign")
    {
        return Err(TlsError::CertificateValidation(
            "CA certificate missing required keyCertSign usage".to_string(),
        ));
    }

    Ok(())
}

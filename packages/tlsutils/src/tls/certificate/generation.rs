//! Certificate issuance: root CA, intermediate, end-entity and self-signed

use std::net::IpAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, IsCa,
    Issuer, KeyPair, KeyUsagePurpose, SanType, SerialNumber,
};
use tracing::info;

use super::options::{X509CreateCertificateOptions, is_dns_name};
use super::pair::CertKeyPair;
use super::parser::Certificate;
use super::utils::generate_certificate_serial_number;
use crate::tls::errors::{Result, TlsError};
use crate::tls::key::generate_private_key;
use crate::tls::types::CertificateKind;

/// 9999-12-31T23:59:59Z
const LATEST_CERTIFICATE_TIME_SECS: u64 = 253_402_300_799;

/// 0000-01-01T00:00:00Z, counted back from the epoch
const EARLIEST_CERTIFICATE_TIME_SECS_BEFORE_EPOCH: u64 = 62_167_219_200;

/// Self-signed CA certificate that anchors a chain
pub fn create_root_ca_certificate(options: &X509CreateCertificateOptions) -> Result<CertKeyPair> {
    issue(options, CertificateKind::RootCa, None)
}

/// CA certificate signed by `issuer`, able to sign end-entity certificates
pub fn create_signed_intermediate_certificate(
    options: &X509CreateCertificateOptions,
    issuer: &CertKeyPair,
) -> Result<CertKeyPair> {
    issue(options, CertificateKind::Intermediate, Some(issuer))
}

/// Non-CA certificate signed by `issuer`, usable for TLS server and client auth
pub fn create_signed_end_entity_certificate(
    options: &X509CreateCertificateOptions,
    issuer: &CertKeyPair,
) -> Result<CertKeyPair> {
    issue(options, CertificateKind::EndEntity, Some(issuer))
}

/// Non-CA certificate signed by its own key
pub fn create_self_signed_certificate(
    options: &X509CreateCertificateOptions,
) -> Result<CertKeyPair> {
    issue(options, CertificateKind::SelfSigned, None)
}

fn issue(
    options: &X509CreateCertificateOptions,
    kind: CertificateKind,
    issuer: Option<&CertKeyPair>,
) -> Result<CertKeyPair> {
    options.validate()?;

    if let Some(issuer) = issuer
        && !issuer.certificate().is_ca()
    {
        return Err(TlsError::InvalidInput(format!(
            "issuer '{}' is not a CA certificate",
            issuer.certificate().parsed().common_name().unwrap_or("<unnamed>")
        )));
    }

    let path_len = match issuer {
        Some(issuer) if kind == CertificateKind::Intermediate => {
            child_path_len(issuer.certificate())?
        }
        _ => None,
    };

    let serial = options
        .serial_number
        .unwrap_or_else(generate_certificate_serial_number);
    let params = setup_certificate_params(options, kind, serial, path_len)?;

    let private_key = generate_private_key(options.key_algorithm)?;
    let key_pair = private_key.key_pair()?;

    let cert = match issuer {
        None => params.self_signed(&key_pair).map_err(|e| {
            TlsError::Signing(format!("Failed to self-sign {kind} certificate: {e}"))
        })?,
        Some(issuer) => {
            let ca_issuer = load_issuer(issuer)?;
            params.signed_by(&key_pair, &ca_issuer).map_err(|e| {
                TlsError::Signing(format!("Failed to sign {kind} certificate: {e}"))
            })?
        }
    };

    let certificate = Certificate::from_der(cert.der().as_ref())?;

    info!(
        "Issued {} certificate CN={} serial={:x}",
        kind, options.common_name, serial
    );

    Ok(CertKeyPair::new(certificate, private_key))
}

/// Rebuild an rcgen issuer from the CA's own certificate so the child's
/// issuer name is byte-identical to the CA's subject
fn load_issuer(issuer: &CertKeyPair) -> Result<Issuer<'static, KeyPair>> {
    let ca_key = issuer.private_key().key_pair()?;
    Issuer::from_ca_cert_der(issuer.certificate().der(), ca_key)
        .map_err(|e| TlsError::Signing(format!("Failed to load CA issuer: {e}")))
}

/// Path length for an intermediate under `issuer`: one less than the
/// issuer's, or unconstrained below an unconstrained issuer
fn child_path_len(issuer: &Certificate) -> Result<Option<u8>> {
    match issuer.parsed().path_len_constraint {
        None => Ok(None),
        Some(0) => Err(TlsError::InvalidInput(format!(
            "issuer '{}' has path length 0 and cannot sign intermediate CAs",
            issuer.parsed().common_name().unwrap_or("<unnamed>")
        ))),
        Some(n) => Ok(Some(u8::try_from(n - 1).unwrap_or(u8::MAX))),
    }
}

fn setup_certificate_params(
    options: &X509CreateCertificateOptions,
    kind: CertificateKind,
    serial: u128,
    path_len: Option<u8>,
) -> Result<CertificateParams> {
    let mut params = CertificateParams::default();
    params.distinguished_name = distinguished_name(options);
    params.serial_number = Some(serial_number(serial));

    let not_before = truncate_to_seconds(options.not_before.unwrap_or_else(SystemTime::now));
    let not_after = not_before.checked_add(options.validity).ok_or_else(|| {
        TlsError::InvalidOptions(format!(
            "validity of {:?} overflows the certificate end date",
            options.validity
        ))
    })?;
    check_encodable_time("not_before", not_before)?;
    check_encodable_time("not_after", not_after)?;
    params.not_before = not_before.into();
    params.not_after = not_after.into();

    params.subject_alt_names = setup_san_entries(options, kind)?;

    match kind {
        CertificateKind::RootCa | CertificateKind::Intermediate => {
            params.is_ca = IsCa::Ca(match path_len {
                Some(len) => BasicConstraints::Constrained(len),
                None => BasicConstraints::Unconstrained,
            });
            params.key_usages = vec![
                KeyUsagePurpose::KeyCertSign,
                KeyUsagePurpose::CrlSign,
                KeyUsagePurpose::DigitalSignature,
            ];
        }
        CertificateKind::EndEntity | CertificateKind::SelfSigned => {
            params.is_ca = IsCa::ExplicitNoCa;
            params.key_usages = vec![
                KeyUsagePurpose::DigitalSignature,
                KeyUsagePurpose::KeyEncipherment,
            ];
            params.extended_key_usages = vec![
                ExtendedKeyUsagePurpose::ServerAuth,
                ExtendedKeyUsagePurpose::ClientAuth,
            ];
        }
    }

    params.use_authority_key_identifier_extension =
        matches!(kind, CertificateKind::Intermediate | CertificateKind::EndEntity);

    Ok(params)
}

fn distinguished_name(options: &X509CreateCertificateOptions) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, options.common_name.as_str());
    if let Some(organization) = &options.organization {
        dn.push(DnType::OrganizationName, organization.as_str());
    }
    if let Some(unit) = &options.organizational_unit {
        dn.push(DnType::OrganizationalUnitName, unit.as_str());
    }
    if let Some(locality) = &options.locality {
        dn.push(DnType::LocalityName, locality.as_str());
    }
    if let Some(province) = &options.province {
        dn.push(DnType::StateOrProvinceName, province.as_str());
    }
    if let Some(country) = &options.country {
        dn.push(DnType::CountryName, country.to_ascii_uppercase());
    }
    dn
}

/// End-entity certificates also carry their CN as a SAN when it is a host name
fn setup_san_entries(
    options: &X509CreateCertificateOptions,
    kind: CertificateKind,
) -> Result<Vec<SanType>> {
    let mut names: Vec<&str> = Vec::new();
    if matches!(kind, CertificateKind::EndEntity | CertificateKind::SelfSigned) {
        let cn = options.common_name.as_str();
        if cn.parse::<IpAddr>().is_ok() || is_dns_name(cn) {
            names.push(cn);
        }
    }
    for san in &options.additional_sans {
        if !names.contains(&san.as_str()) {
            names.push(san.as_str());
        }
    }

    names
        .into_iter()
        .map(|name| {
            if let Ok(ip) = name.parse::<IpAddr>() {
                return Ok(SanType::IpAddress(ip));
            }
            name.to_string()
                .try_into()
                .map(SanType::DnsName)
                .map_err(|e| TlsError::InvalidOptions(format!("Invalid DNS name '{name}': {e}")))
        })
        .collect()
}

fn serial_number(serial: u128) -> SerialNumber {
    let bytes = serial.to_be_bytes();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
    SerialNumber::from(bytes[start..].to_vec())
}

/// GeneralizedTime spans 0000-01-01T00:00:00Z to 9999-12-31T23:59:59Z
fn check_encodable_time(field: &str, time: SystemTime) -> Result<()> {
    let in_range = match time.duration_since(UNIX_EPOCH) {
        Ok(after_epoch) => after_epoch.as_secs() <= LATEST_CERTIFICATE_TIME_SECS,
        Err(e) => e.duration().as_secs() <= EARLIEST_CERTIFICATE_TIME_SECS_BEFORE_EPOCH,
    };
    if in_range {
        Ok(())
    } else {
        Err(TlsError::InvalidOptions(format!(
            "{field} {time:?} is outside the years 0000-9999 that X.509 can encode"
        )))
    }
}

/// X.509 times have whole-second resolution
fn truncate_to_seconds(time: SystemTime) -> SystemTime {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since_epoch) => UNIX_EPOCH + Duration::from_secs(since_epoch.as_secs()),
        Err(_) => time,
    }
}

//! Certificate decoding: DER/PEM to `Certificate` and back

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use pem::{EncodeConfig, LineEnding, Pem};
use rustls::pki_types::CertificateDer;
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::GeneralName;
use x509_parser::time::ASN1Time;
use x509_parser::x509::X509Name;

use crate::tls::errors::{Result, TlsError};
use crate::tls::types::ParsedCertificate;

pub(crate) const CERTIFICATE_PEM_TAG: &str = "CERTIFICATE";

/// A parsed X.509 certificate; immutable after construction
#[derive(Debug, Clone)]
pub struct Certificate {
    der: CertificateDer<'static>,
    parsed: ParsedCertificate,
}

impl Certificate {
    /// Parse DER bytes
    pub fn from_der(der: &[u8]) -> Result<Self> {
        if der.is_empty() {
            return Err(TlsError::InvalidInput("certificate DER is empty".to_string()));
        }

        let parsed = {
            let x509 = parse_x509(der)?;
            parsed_certificate(&x509)?
        };

        Ok(Self {
            der: CertificateDer::from(der.to_vec()),
            parsed,
        })
    }

    /// Parse a PEM string holding exactly one certificate
    pub fn from_pem(pem: &str) -> Result<Self> {
        let mut certs = parse_certificates_from_pem(pem)?;
        match certs.len() {
            1 => Ok(certs.remove(0)),
            0 => Err(TlsError::CertificateParsing(
                "No certificate found in PEM data".to_string(),
            )),
            n => Err(TlsError::CertificateParsing(format!(
                "Expected a single certificate in PEM data, found {n}"
            ))),
        }
    }

    /// Encode as a PEM block with LF line endings
    #[must_use]
    pub fn to_pem(&self) -> String {
        let block = Pem::new(CERTIFICATE_PEM_TAG, self.der.to_vec());
        pem::encode_config(&block, EncodeConfig::new().set_line_ending(LineEnding::LF))
    }

    #[must_use]
    pub fn der(&self) -> &CertificateDer<'static> {
        &self.der
    }

    #[must_use]
    pub fn parsed(&self) -> &ParsedCertificate {
        &self.parsed
    }

    #[must_use]
    pub fn not_before(&self) -> SystemTime {
        self.parsed.not_before
    }

    #[must_use]
    pub fn not_after(&self) -> SystemTime {
        self.parsed.not_after
    }

    #[must_use]
    pub fn is_ca(&self) -> bool {
        self.parsed.is_ca
    }

    /// Byte-equal subject and issuer names
    #[must_use]
    pub fn has_matching_subject_and_issuer(&self) -> bool {
        self.parsed.subject_der == self.parsed.issuer_der
    }

    /// Borrowing x509-parser view; the bytes were validated at construction
    pub(crate) fn x509(&self) -> Result<X509Certificate<'_>> {
        parse_x509(self.der.as_ref())
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

/// Parse every CERTIFICATE block in `pem_data`, keeping their order
///
/// Blocks with other labels (keys, CSRs) are skipped.
pub fn parse_certificates_from_pem(pem_data: &str) -> Result<Vec<Certificate>> {
    let ders = rustls_pemfile::certs(&mut pem_data.as_bytes())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| TlsError::CertificateParsing(format!("Malformed PEM data: {e}")))?;

    tracing::debug!("Found {} certificate block(s) in PEM data", ders.len());

    ders.iter()
        .map(|der| Certificate::from_der(der.as_ref()))
        .collect()
}

fn parse_x509(der: &[u8]) -> Result<X509Certificate<'_>> {
    let (rest, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| TlsError::CertificateParsing(format!("Failed to parse DER certificate: {e}")))?;

    if !rest.is_empty() {
        return Err(TlsError::CertificateParsing(format!(
            "{} trailing bytes after certificate",
            rest.len()
        )));
    }
    Ok(cert)
}

fn parsed_certificate(cert: &X509Certificate<'_>) -> Result<ParsedCertificate> {
    let (san_dns_names, san_ip_addresses) = extract_subject_alt_names(cert)?;

    Ok(ParsedCertificate {
        subject: extract_name_attributes(cert.subject()),
        issuer: extract_name_attributes(cert.issuer()),
        subject_der: cert.subject().as_raw().to_vec(),
        issuer_der: cert.issuer().as_raw().to_vec(),
        san_dns_names,
        san_ip_addresses,
        is_ca: cert.is_ca(),
        path_len_constraint: extract_path_len_constraint(cert)?,
        key_usage: extract_key_usage(cert)?,
        not_before: asn1_to_system_time(&cert.validity().not_before),
        not_after: asn1_to_system_time(&cert.validity().not_after),
        serial_number: cert.raw_serial().to_vec(),
        version: cert.version().0 + 1,
    })
}

/// Extract the common DN components keyed by their short names
fn extract_name_attributes(name: &X509Name<'_>) -> HashMap<String, String> {
    const OID_CN: &str = "2.5.4.3";
    const OID_O: &str = "2.5.4.10";
    const OID_OU: &str = "2.5.4.11";
    const OID_C: &str = "2.5.4.6";
    const OID_ST: &str = "2.5.4.8";
    const OID_L: &str = "2.5.4.7";

    let mut attrs = HashMap::new();
    for attr in name.iter_attributes() {
        let key = match attr.attr_type().to_id_string().as_str() {
            OID_CN => "CN",
            OID_O => "O",
            OID_OU => "OU",
            OID_C => "C",
            OID_ST => "ST",
            OID_L => "L",
            _ => continue,
        };
        if let Ok(value) = attr.as_str() {
            attrs.insert(key.to_string(), value.to_string());
        }
    }
    attrs
}

fn extract_subject_alt_names(
    cert: &X509Certificate<'_>,
) -> Result<(Vec<String>, Vec<IpAddr>)> {
    let mut dns_names = Vec::new();
    let mut ip_addresses = Vec::new();

    let san = cert
        .subject_alternative_name()
        .map_err(|e| TlsError::CertificateParsing(format!("Invalid SAN extension: {e}")))?;

    if let Some(san) = san {
        for name in &san.value.general_names {
            match name {
                GeneralName::DNSName(dns) => dns_names.push((*dns).to_string()),
                GeneralName::IPAddress(bytes) => match bytes.len() {
                    4 => {
                        let octets: [u8; 4] = [bytes[0], bytes[1], bytes[2], bytes[3]];
                        ip_addresses.push(IpAddr::V4(Ipv4Addr::from(octets)));
                    }
                    16 => {
                        let mut octets = [0u8; 16];
                        octets.copy_from_slice(bytes);
                        ip_addresses.push(IpAddr::V6(Ipv6Addr::from(octets)));
                    }
                    n => tracing::warn!("Ignoring SAN IP address with {} bytes", n),
                },
                _ => {}
            }
        }
    }

    Ok((dns_names, ip_addresses))
}

fn extract_path_len_constraint(cert: &X509Certificate<'_>) -> Result<Option<u32>> {
    let constraints = cert.basic_constraints().map_err(|e| {
        TlsError::CertificateParsing(format!("Invalid BasicConstraints extension: {e}"))
    })?;
    Ok(constraints.and_then(|ext| ext.value.path_len_constraint))
}

fn extract_key_usage(cert: &X509Certificate<'_>) -> Result<Vec<String>> {
    let key_usage = cert
        .key_usage()
        .map_err(|e| TlsError::CertificateParsing(format!("Invalid KeyUsage extension: {e}")))?;

    let Some(key_usage) = key_usage else {
        return Ok(Vec::new());
    };
    let ku = key_usage.value;

    let usages = [
        (ku.digital_signature(), "digitalSignature"),
        (ku.non_repudiation(), "nonRepudiation"),
        (ku.key_encipherment(), "keyEncipherment"),
        (ku.data_encipherment(), "dataEncipherment"),
        (ku.key_agreement(), "keyAgreement"),
        (ku.key_cert_sign(), "keyCertSign"),
        (ku.crl_sign(), "cRLSign"),
        (ku.encipher_only(), "encipherOnly"),
        (ku.decipher_only(), "decipherOnly"),
    ];

    Ok(usages
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| name.to_string())
        .collect())
}

fn asn1_to_system_time(time: &ASN1Time) -> SystemTime {
    let timestamp = time.timestamp();
    if timestamp >= 0 {
        UNIX_EPOCH + Duration::from_secs(timestamp.unsigned_abs())
    } else {
        UNIX_EPOCH - Duration::from_secs(timestamp.unsigned_abs())
    }
}

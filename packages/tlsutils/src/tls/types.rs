//! Core types and structures for certificate handling

use std::collections::HashMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::errors::{Result, TlsError};

/// Key algorithm used when generating a fresh private key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAlgorithm {
    /// ECDSA over NIST P-256 with SHA-256
    #[default]
    EcdsaP256,
    /// ECDSA over NIST P-384 with SHA-384
    EcdsaP384,
    /// Ed25519
    Ed25519,
    /// RSA with PKCS#1 v1.5 SHA-256 signatures; `bits` is the modulus size
    Rsa { bits: usize },
}

impl KeyAlgorithm {
    /// RSA modulus sizes accepted for generation
    pub const RSA_KEY_SIZES: [usize; 3] = [2048, 3072, 4096];

    /// Key size in bits
    #[must_use]
    pub fn key_size(&self) -> usize {
        match self {
            KeyAlgorithm::EcdsaP256 | KeyAlgorithm::Ed25519 => 256,
            KeyAlgorithm::EcdsaP384 => 384,
            KeyAlgorithm::Rsa { bits } => *bits,
        }
    }

    /// Reject RSA modulus sizes outside `RSA_KEY_SIZES`
    pub fn check_supported(&self) -> Result<()> {
        match self {
            KeyAlgorithm::Rsa { bits } if !Self::RSA_KEY_SIZES.contains(bits) => {
                Err(TlsError::InvalidOptions(format!(
                    "RSA key size {bits} is not one of {:?}",
                    Self::RSA_KEY_SIZES
                )))
            }
            _ => Ok(()),
        }
    }
}

/// The role a certificate plays in a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateKind {
    RootCa,
    Intermediate,
    EndEntity,
    SelfSigned,
}

impl std::fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CertificateKind::RootCa => "root CA",
            CertificateKind::Intermediate => "intermediate",
            CertificateKind::EndEntity => "end-entity",
            CertificateKind::SelfSigned => "self-signed",
        };
        f.write_str(name)
    }
}

/// Parsed certificate information extracted from X.509
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCertificate {
    pub subject: HashMap<String, String>,
    pub issuer: HashMap<String, String>,
    /// Raw DER-encoded subject name
    pub subject_der: Vec<u8>,
    /// Raw DER-encoded issuer name
    pub issuer_der: Vec<u8>,
    pub san_dns_names: Vec<String>,
    pub san_ip_addresses: Vec<std::net::IpAddr>,
    pub is_ca: bool,
    /// BasicConstraints pathLenConstraint; `None` when absent or unlimited
    pub path_len_constraint: Option<u32>,
    pub key_usage: Vec<String>,
    pub not_before: SystemTime,
    pub not_after: SystemTime,
    pub serial_number: Vec<u8>,
    /// X.509 version as written on the wire (3 for v3)
    pub version: u32,
}

impl ParsedCertificate {
    /// Common name of the subject, if present
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.subject.get("CN").map(String::as_str)
    }

    /// Serial number as lowercase hex
    #[must_use]
    pub fn serial_hex(&self) -> String {
        hex::encode(&self.serial_number)
    }
}

//! X.509 certificate helpers
//!
//! Issuance, inspection and chain validation. Cryptography and path
//! validation are delegated to rcgen, x509-parser and rustls/webpki.

pub mod certificate;
pub mod config;
pub mod errors;
pub mod key;
pub mod types;

pub use certificate::*;
pub use config::{CertificateDefaults, DEFAULT_VALIDITY, DEFAULT_VALIDITY_DAYS};
pub use errors::{Result, TlsError};
pub use key::{PrivateKey, generate_private_key};
pub use types::{CertificateKind, KeyAlgorithm, ParsedCertificate};

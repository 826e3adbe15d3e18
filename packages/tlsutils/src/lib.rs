//! # Infrakit TLS utilities
//!
//! X.509 certificate handling for infrastructure automation: issue root CA,
//! intermediate, end-entity and self-signed certificates, classify and
//! inspect them, move them between PEM and DER, and validate
//! end-entity/intermediate/root chains.
//!
//! ## Usage
//!
//! ```no_run
//! use infrakit_tlsutils::tls::{
//!     X509CreateCertificateOptions, check_certificate_chain_string, create_root_ca_certificate,
//!     create_signed_end_entity_certificate, create_signed_intermediate_certificate,
//! };
//!
//! # fn main() -> infrakit_tlsutils::tls::Result<()> {
//! let root = create_root_ca_certificate(&X509CreateCertificateOptions::new("Example Root CA"))?;
//! let intermediate = create_signed_intermediate_certificate(
//!     &X509CreateCertificateOptions::new("Example Intermediate CA"),
//!     &root,
//! )?;
//! let leaf = create_signed_end_entity_certificate(
//!     &X509CreateCertificateOptions::new("api.example.com"),
//!     &intermediate,
//! )?;
//!
//! let chain = format!(
//!     "{}{}{}",
//!     leaf.certificate_pem(),
//!     intermediate.certificate_pem(),
//!     root.certificate_pem()
//! );
//! check_certificate_chain_string(&chain)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod file;
pub mod tls;

pub use file::{FileHandle, LocalFile};
pub use tls::{CertKeyPair, Certificate, PrivateKey, TlsError, X509CreateCertificateOptions};

//! Infrakit Public API
//!
//! Certificate tooling for infrastructure automation: a fluent builder for
//! issuing X.509 certificates, the underlying helpers re-exported from
//! `infrakit_tlsutils`, and panic-on-error adapters for CLI entry points.
//!
//! ```no_run
//! use infrakit::X509;
//!
//! # fn main() -> Result<(), infrakit::TlsError> {
//! let root = X509::root_ca("Example Root CA").organization("Example").create()?;
//! let intermediate = X509::intermediate("Example Issuing CA").signed_by(&root).create()?;
//! let leaf = X509::end_entity("www.example.com")
//!     .san("example.com")
//!     .valid_for_days(30)
//!     .signed_by(&intermediate)
//!     .create()?;
//!
//! infrakit::check_certificate_chain_string(&format!(
//!     "{}{}{}",
//!     leaf.certificate_pem(),
//!     intermediate.certificate_pem(),
//!     root.certificate_pem(),
//! ))?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod must;

pub use builder::{
    CertificateBuilder, CertificateRole, IssuerNotSet, IssuerSet, SelfIssued, X509,
};

// Re-export important types from the implementation package
pub use infrakit_tlsutils::tls::*;
pub use infrakit_tlsutils::{FileHandle, LocalFile};

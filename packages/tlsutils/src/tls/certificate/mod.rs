//! Certificate management module
//!
//! This module provides the certificate lifecycle pieces:
//! - Issuance of root CA, intermediate, end-entity and self-signed certificates
//! - PEM/DER decoding and encoding
//! - Classification predicates and signature checks
//! - Certificate chain verification

pub mod generation;
pub mod options;
pub mod pair;
pub mod parser;
pub mod parsing;
pub mod utils;
pub mod validation;

pub use generation::{
    create_root_ca_certificate, create_self_signed_certificate,
    create_signed_end_entity_certificate, create_signed_intermediate_certificate,
};
pub use options::X509CreateCertificateOptions;
pub use pair::CertKeyPair;
pub use parser::{Certificate, parse_certificates_from_pem};
pub use parsing::{check_certificate_expiry, check_certificate_expiry_at, validate_basic_constraints};
pub use utils::{
    SERIAL_NUMBER_CEILING, SERIAL_NUMBER_FLOOR, encode_certificate_as_der,
    encode_certificate_as_pem_string, generate_certificate_serial_number, get_validity_duration,
    is_cert_signed_by, is_certificate_matching_private_key, is_certificate_root_ca,
    is_end_entity_certificate, is_intermediate_certificate, is_self_signed_certificate,
    load_certificate_from_der, load_certificate_from_pem_string,
    load_certificates_from_pem_string, verify_certificate_chain,
};
pub use validation::{EXPECTED_CHAIN_LENGTH, check_certificate_chain_string};

//! TLS-specific error types for detailed error handling

/// Result alias used throughout the certificate helpers
pub type Result<T> = std::result::Result<T, TlsError>;

/// TLS-specific error types for detailed error handling
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("Invalid certificate options: {0}")]
    InvalidOptions(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Certificate parsing failed: {0}")]
    CertificateParsing(String),
    #[error("Private key parsing failed: {0}")]
    KeyParsing(String),
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
    #[error("Certificate signing failed: {0}")]
    Signing(String),
    #[error("Certificate expired: {0}")]
    CertificateExpired(String),
    #[error("Certificate chain must contain exactly {expected} certificates, found {found}")]
    ChainLength { expected: usize, found: usize },
    #[error("No valid certificate chain: {0}")]
    NoValidCertificateChain(String),
    #[error("Certificate validation failed: {0}")]
    CertificateValidation(String),
    #[error("File operation failed: {0}")]
    FileOperation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TlsError {
    /// True when the verifier could not build any trusted path for the chain
    #[must_use]
    pub fn is_no_valid_chain(&self) -> bool {
        matches!(self, TlsError::NoValidCertificateChain(_))
    }
}

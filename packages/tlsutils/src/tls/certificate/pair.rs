//! Certificate plus private key, and their PEM persistence

use std::path::{Path, PathBuf};

use tracing::info;

use super::parser::Certificate;
use super::utils::is_certificate_matching_private_key;
use crate::file::{FileHandle, LocalFile};
use crate::tls::errors::{Result, TlsError};
use crate::tls::key::PrivateKey;

/// An issued certificate together with its private key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertKeyPair {
    certificate: Certificate,
    private_key: PrivateKey,
}

impl CertKeyPair {
    pub(crate) fn new(certificate: Certificate, private_key: PrivateKey) -> Self {
        Self {
            certificate,
            private_key,
        }
    }

    /// Pair an existing certificate with its key; fails if they do not match
    pub fn from_parts(certificate: Certificate, private_key: PrivateKey) -> Result<Self> {
        if !is_certificate_matching_private_key(&certificate, &private_key)? {
            return Err(TlsError::InvalidInput(
                "private key does not match the certificate's public key".to_string(),
            ));
        }
        Ok(Self::new(certificate, private_key))
    }

    pub fn from_pem(certificate_pem: &str, private_key_pem: &str) -> Result<Self> {
        let certificate = Certificate::from_pem(certificate_pem)?;
        let private_key = PrivateKey::from_pem(private_key_pem)?;
        Self::from_parts(certificate, private_key)
    }

    #[must_use]
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    #[must_use]
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    #[must_use]
    pub fn certificate_pem(&self) -> String {
        self.certificate.to_pem()
    }

    #[must_use]
    pub fn private_key_pem(&self) -> String {
        self.private_key.to_pem()
    }

    /// Write the certificate and key PEM; the key file is made owner-only
    pub fn write_pem_files(
        &self,
        certificate_file: &impl FileHandle,
        key_file: &impl FileHandle,
    ) -> Result<()> {
        certificate_file.write_bytes(self.certificate_pem().as_bytes())?;
        key_file.write_private_bytes(self.private_key_pem().as_bytes())?;
        Ok(())
    }

    pub fn load_pem_files(
        certificate_file: &impl FileHandle,
        key_file: &impl FileHandle,
    ) -> Result<Self> {
        require_exists(certificate_file)?;
        require_exists(key_file)?;
        Self::from_pem(
            &certificate_file.read_as_string()?,
            &key_file.read_as_string()?,
        )
    }

    /// Write `<name>.crt` and `<name>.key` under `dir` and return both paths
    pub fn write_to_directory(&self, dir: &Path, name: &str) -> Result<(PathBuf, PathBuf)> {
        let (cert_path, key_path) = pem_file_paths(dir, name)?;
        self.write_pem_files(&LocalFile::new(&cert_path), &LocalFile::new(&key_path))?;
        info!(
            "Saved certificate and key for '{}' to {}",
            name,
            dir.display()
        );
        Ok((cert_path, key_path))
    }

    pub fn load_from_directory(dir: &Path, name: &str) -> Result<Self> {
        let (cert_path, key_path) = pem_file_paths(dir, name)?;
        Self::load_pem_files(&LocalFile::new(cert_path), &LocalFile::new(key_path))
    }
}

fn require_exists(file: &impl FileHandle) -> Result<()> {
    if file.exists()? {
        Ok(())
    } else {
        Err(TlsError::FileOperation(format!(
            "{} does not exist",
            file.path().display()
        )))
    }
}

fn pem_file_paths(dir: &Path, name: &str) -> Result<(PathBuf, PathBuf)> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(TlsError::InvalidInput(format!(
            "'{name}' is not a usable file name"
        )));
    }
    Ok((
        dir.join(format!("{name}.crt")),
        dir.join(format!("{name}.key")),
    ))
}

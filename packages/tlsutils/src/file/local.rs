use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::FileHandle;
use crate::tls::errors::{Result, TlsError};

/// A file on the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                TlsError::FileOperation(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }
}

impl FileHandle for LocalFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.path.try_exists()?)
    }

    fn read_as_string(&self) -> Result<String> {
        debug!("Reading {}", self.path.display());
        fs::read_to_string(&self.path).map_err(|e| {
            TlsError::FileOperation(format!("Failed to read {}: {e}", self.path.display()))
        })
    }

    fn write_bytes(&self, data: &[u8]) -> Result<()> {
        self.ensure_parent_dir()?;
        debug!("Writing {} bytes to {}", data.len(), self.path.display());
        fs::write(&self.path, data).map_err(|e| {
            TlsError::FileOperation(format!("Failed to write {}: {e}", self.path.display()))
        })
    }

    fn write_private_bytes(&self, data: &[u8]) -> Result<()> {
        self.write_bytes(data)?;

        // Set permissions on key file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

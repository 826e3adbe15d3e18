//! File collaborator used to persist PEM material
//!
//! Certificate code only needs to read a file as text and write bytes to it,
//! so that is all the trait asks for. `LocalFile` backs it with `std::fs`.

mod local;

pub use local::LocalFile;

use std::path::Path;

use crate::tls::errors::Result;

/// Minimal read/write contract over a single file
pub trait FileHandle {
    fn path(&self) -> &Path;

    fn exists(&self) -> Result<bool>;

    fn read_as_string(&self) -> Result<String>;

    /// Create or truncate the file and write `data`
    fn write_bytes(&self, data: &[u8]) -> Result<()>;

    /// Like `write_bytes`, but the file ends up readable by the owner only
    fn write_private_bytes(&self, data: &[u8]) -> Result<()>;
}

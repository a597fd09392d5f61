//! File identity: size plus SHA-256 content checksum
//!
//! Two files are considered the same when their sizes match and, only then,
//! their checksums match. Checksums are lowercase hex strings.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::Path;

use crate::{Error, Result};

/// Size and content checksum of a file at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileIdentity {
    /// File size in bytes
    pub size: u64,
    /// Hex-encoded content digest
    pub checksum: String,
}

impl FileIdentity {
    pub fn new(size: u64, checksum: impl Into<String>) -> Self {
        Self {
            size,
            checksum: checksum.into(),
        }
    }

    /// Identity of an in-memory buffer.
    pub fn of_bytes(content: &[u8]) -> Self {
        Self {
            size: content.len() as u64,
            checksum: compute_content_checksum(content),
        }
    }
}

/// Compute the SHA-256 checksum of in-memory content.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents, streaming.
///
/// # Errors
///
/// Returns an error naming `path` if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| Error::io(path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the identity of the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the path is missing or unreadable.
pub fn identity(path: &Path) -> Result<FileIdentity> {
    let metadata = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    Ok(FileIdentity {
        size: metadata.len(),
        checksum: compute_file_checksum(path)?,
    })
}

/// Compute the identity of `path`, or `None` if nothing is there.
pub fn identity_if_exists(path: &Path) -> Result<Option<FileIdentity>> {
    match identity(path) {
        Ok(id) => Ok(Some(id)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Whether two identities describe the same content.
///
/// Sizes are compared first; checksums only when the sizes agree.
pub fn unchanged(a: &FileIdentity, b: &FileIdentity) -> bool {
    a.size == b.size && a.checksum == b.checksum
}

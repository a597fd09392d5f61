//! Baseline records: what the engine last installed for a package
//!
//! A baseline maps each installed file's path (relative to the install root,
//! forward slashes) to the size and checksum it had when installed. It is
//! persisted as one JSON object per package:
//!
//! ```json
//! { "lib/Blog.php": { "size": 1204, "md5sum": "9f86d0…" } }
//! ```

mod store;

pub use store::BaselineStore;

use std::collections::BTreeMap;

use modsync_fs::{FileIdentity, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Recorded identity of one installed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File size in bytes
    pub size: u64,
    /// Hex content digest. The key name is part of the on-disk format.
    #[serde(rename = "md5sum")]
    pub checksum: String,
}

impl FileRecord {
    pub fn identity(&self) -> FileIdentity {
        FileIdentity::new(self.size, self.checksum.clone())
    }
}

impl From<FileIdentity> for FileRecord {
    fn from(id: FileIdentity) -> Self {
        Self {
            size: id.size,
            checksum: id.checksum,
        }
    }
}

impl From<&FileIdentity> for FileRecord {
    fn from(id: &FileIdentity) -> Self {
        Self {
            size: id.size,
            checksum: id.checksum.clone(),
        }
    }
}

/// All recorded files of one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Baseline {
    files: BTreeMap<String, FileRecord>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, record: impl Into<FileRecord>) {
        self.files.insert(path.into(), record.into());
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Recorded paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileRecord)> {
        self.files.iter().map(|(path, record)| (path.as_str(), record))
    }

    /// Check that every recorded path is a plain relative path.
    ///
    /// A path that normalizes to something else (absolute, containing `..`,
    /// `.` or doubled separators) could point outside the install root or at
    /// another package's file, so it is rejected.
    pub fn validate(&self, package: &str) -> Result<()> {
        for path in self.files.keys() {
            let normalized = NormalizedPath::new(path);
            if path.is_empty() || path.starts_with('/') || normalized.as_str() != path {
                return Err(Error::InvalidBaseline {
                    package: package.to_string(),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, FileRecord)> for Baseline {
    fn from_iter<I: IntoIterator<Item = (String, FileRecord)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_md5sum_key() {
        let mut baseline = Baseline::new();
        baseline.insert("lib/a.php", FileIdentity::new(3, "abc"));

        let json = serde_json::to_value(&baseline).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "lib/a.php": { "size": 3, "md5sum": "abc" } })
        );
    }

    #[test]
    fn deserializes_plain_object() {
        let baseline: Baseline =
            serde_json::from_str(r#"{"x.txt": {"size": 1, "md5sum": "ff"}}"#).unwrap();
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline.get("x.txt").unwrap().identity(), FileIdentity::new(1, "ff"));
    }

    #[test]
    fn validate_rejects_escaping_paths() {
        for bad in ["../outside", "/etc/passwd", "a/../b", "a//b", "./a", ""] {
            let mut baseline = Baseline::new();
            baseline.insert(bad, FileIdentity::new(0, ""));
            assert!(baseline.validate("pkg").is_err(), "accepted {:?}", bad);
        }

        let mut ok = Baseline::new();
        ok.insert("lib/a.php", FileIdentity::new(0, ""));
        assert!(ok.validate("pkg").is_ok());
    }
}

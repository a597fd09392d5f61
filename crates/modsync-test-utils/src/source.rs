//! [`PackageSource`]: a package checkout on local disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Installable files live under this subdirectory of a checkout.
pub const SOURCE_SUBDIR: &str = "src";

/// A temporary package checkout laid out the way a fetched package is:
/// installable files under `src/`, metadata next to it.
pub struct PackageSource {
    temp_dir: TempDir,
}

impl Default for PackageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageSource {
    /// A checkout with an empty `src/` directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(SOURCE_SUBDIR)).unwrap();
        fs::write(temp_dir.path().join("composer.json"), "{}").unwrap();
        Self { temp_dir }
    }

    /// A checkout shipping `files`, given as `(path, content)` pairs.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let source = Self::new();
        for (path, content) in files {
            source.file(path, content);
        }
        source
    }

    /// Directory to hand to a fetcher.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn installable(&self, relative: &str) -> PathBuf {
        self.path().join(SOURCE_SUBDIR).join(relative)
    }

    /// Ship a file at `relative`, replacing any previous content.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.installable(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Stop shipping the file at `relative`, along with any directories
    /// it leaves empty.
    pub fn drop_file(&self, relative: &str) -> &Self {
        let path = self.installable(relative);
        fs::remove_file(&path).unwrap();

        let top = self.path().join(SOURCE_SUBDIR);
        let mut dir = path.parent();
        while let Some(current) = dir {
            if current == top || fs::remove_dir(current).is_err() {
                break;
            }
            dir = current.parent();
        }
        self
    }

    /// Ship an empty directory at `relative`.
    pub fn dir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.installable(relative)).unwrap();
        self
    }
}

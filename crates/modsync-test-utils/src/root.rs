//! [`TestRoot`]: a temporary install root for sync scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary install root with helpers for setting up local edits and
/// checking the result of an operation.
///
/// # Example
///
/// ```rust,no_run
/// use modsync_test_utils::TestRoot;
///
/// let root = TestRoot::new();
/// root.write("lib/Blog.php", "<?php // edited");
/// root.assert_file_contains("lib/Blog.php", "edited");
/// ```
pub struct TestRoot {
    temp_dir: TempDir,
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoot {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the root.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    pub fn delete(&self, relative: &str) {
        fs::remove_file(self.join(relative)).unwrap();
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.join(relative)).unwrap();
    }

    /// Write `modsync.toml` at the root.
    pub fn write_settings(&self, toml: &str) {
        self.write("modsync.toml", toml);
    }

    /// # Panics
    /// Panics if `relative` is not an existing file.
    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.join(relative);
        assert!(path.is_file(), "Expected file to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if anything exists at `relative`.
    pub fn assert_not_exists(&self, relative: &str) {
        let path = self.join(relative);
        assert!(!path.exists(), "Expected NOT to exist: {}", path.display());
    }

    pub fn assert_dir_exists(&self, relative: &str) {
        let path = self.join(relative);
        assert!(path.is_dir(), "Expected directory to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if the file cannot be read or its content differs.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let actual = self.read(relative);
        assert!(
            actual.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            relative,
            content,
            actual
        );
    }
}

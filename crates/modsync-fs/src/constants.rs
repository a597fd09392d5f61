//! Fixed locations and names used inside an install root.

use std::path::Path;

/// Well-known paths and suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPath {
    /// Directory holding one baseline record per package
    BaselineDir,
    /// Parent of per-package staging directories
    StagingDir,
    /// Subdirectory of a fetched package that gets installed
    SourceSubdir,
    /// Settings file at the install root
    SettingsFile,
    /// Suffix for incoming files that could not replace a modified file
    NewSuffix,
}

impl InstallPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaselineDir => "var/lib/modsync",
            Self::StagingDir => "var/tmp",
            Self::SourceSubdir => "src",
            Self::SettingsFile => "modsync.toml",
            Self::NewSuffix => ".new",
        }
    }
}

impl AsRef<Path> for InstallPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for InstallPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for InstallPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Error types for modsync-core

use std::path::PathBuf;

/// Result type for modsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an install, update or remove.
///
/// Conditions the engine can continue past (missing baseline on update,
/// staging cleanup failures, preserved local edits) are reported as
/// [`Warning`](crate::Warning)s instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No baseline record exists for the package
    #[error("Cannot find package files DB for {package} at {path}")]
    NotFound { package: String, path: PathBuf },

    /// The operator aborted during conflict resolution
    #[error("Operation on {package} aborted by operator")]
    Aborted { package: String },

    /// Copying an incoming file into place failed
    #[error("Cannot copy {from} to {to}: {cause}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        cause: modsync_fs::Error,
    },

    /// The fetch collaborator failed or produced an unusable tree
    #[error("Fetching {package} failed: {message}")]
    Fetch { package: String, message: String },

    /// Package name cannot be used to build a storage path
    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    /// Package type is not handled by this installer
    #[error("Package {package} has unsupported type '{package_type}'")]
    UnsupportedType {
        package: String,
        package_type: String,
    },

    /// A baseline entry does not name a path inside the install root
    #[error("Baseline for {package} records invalid path '{path}'")]
    InvalidBaseline { package: String, path: String },

    /// The operator channel failed or closed before an answer arrived
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from modsync-fs
    #[error(transparent)]
    Fs(#[from] modsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        Error::Fs(modsync_fs::Error::io(path, err.into()))
    }
}

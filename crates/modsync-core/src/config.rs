//! Installer settings and the explicit context passed to the engine
//!
//! Settings are read from `modsync.toml` (or `.json`/`.yaml`) at the install
//! root. Every field has a default, so a missing file or a partial file is
//! fine.

use serde::{Deserialize, Serialize};

use modsync_fs::{ConfigStore, InstallPath, NormalizedPath};

use crate::Result;
use crate::package::DEFAULT_PACKAGE_TYPE;

/// Installer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Baseline directory, relative to the install root
    pub db_dir: String,
    /// Parent of per-package staging directories, relative to the install root
    pub staging_dir: String,
    /// Subdirectory of a fetched package that gets installed
    pub source_subdir: String,
    /// Overwrite or delete locally changed files unless the operator is asked
    pub discard_changes: bool,
    /// Ask before update/remove touch locally changed files
    pub prompt_on_conflict: bool,
    /// Package types this installer handles
    pub package_types: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_dir: InstallPath::BaselineDir.as_str().to_string(),
            staging_dir: InstallPath::StagingDir.as_str().to_string(),
            source_subdir: InstallPath::SourceSubdir.as_str().to_string(),
            discard_changes: false,
            prompt_on_conflict: false,
            package_types: vec![DEFAULT_PACKAGE_TYPE.to_string()],
        }
    }
}

impl Settings {
    /// Candidate settings files, checked in order.
    const FILE_NAMES: [&'static str; 3] = ["modsync.toml", "modsync.json", "modsync.yaml"];

    /// Load settings from the install root, falling back to defaults when no
    /// settings file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or parsed.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let store = ConfigStore::new();
        for name in Self::FILE_NAMES {
            let path = root.join(name);
            if path.is_file() {
                tracing::debug!(path = %path, "loading settings");
                return Ok(store.load(&path)?);
            }
        }
        Ok(Self::default())
    }

    /// Whether packages of `package_type` are handled by this installer.
    pub fn supports(&self, package_type: &str) -> bool {
        self.package_types.iter().any(|t| t == package_type)
    }
}

/// Everything the engine needs to know about its surroundings.
///
/// Passed in explicitly so tests can point the engine at a temporary root.
#[derive(Debug, Clone)]
pub struct InstallContext {
    /// Root of the install tree shared by all packages
    pub root: NormalizedPath,
    /// Installer settings
    pub settings: Settings,
    /// Whether an operator can be prompted
    pub interactive: bool,
}

impl InstallContext {
    pub fn new(root: NormalizedPath, settings: Settings) -> Self {
        Self {
            root,
            settings,
            interactive: false,
        }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Staging directory for one package.
    pub fn staging_path(&self, package_name: &str) -> NormalizedPath {
        self.root.join(&self.settings.staging_dir).join(package_name)
    }
}

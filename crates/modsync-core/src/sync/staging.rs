//! Staging area for a fetched package and the incoming tree read from it

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use modsync_fs::{FileIdentity, NormalizedPath, checksum};
use tracing::debug;
use walkdir::WalkDir;

use super::report::Warning;
use crate::config::InstallContext;
use crate::fetch::Fetcher;
use crate::package::Package;
use crate::{Error, Result};

/// One file of the incoming tree.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Location inside the staging directory
    pub source: PathBuf,
    pub identity: FileIdentity,
}

/// The freshly fetched tree, keyed by path relative to the install root.
#[derive(Debug, Clone, Default)]
pub struct IncomingTree {
    /// Directories in depth-first order, parents before children
    pub dirs: Vec<String>,
    pub files: BTreeMap<String, IncomingFile>,
}

impl IncomingTree {
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

/// A package fetched into `<root>/<staging_dir>/<package>`.
///
/// The directory is removed by [`Staging::cleanup`], or on drop if an
/// operation bails out early.
#[derive(Debug)]
pub struct Staging {
    path: NormalizedPath,
    source_subdir: String,
    cleaned: bool,
}

impl Staging {
    /// Fetch `package` into a fresh staging directory.
    pub fn fetch(ctx: &InstallContext, package: &Package, fetcher: &dyn Fetcher) -> Result<Self> {
        let path = ctx.staging_path(&package.name);
        let native = path.to_native();
        if native.exists() {
            debug!(path = %path, "removing stale staging directory");
            fs::remove_dir_all(&native).map_err(|e| modsync_fs::Error::io(&native, e))?;
        }

        let staging = Self {
            path,
            source_subdir: ctx.settings.source_subdir.clone(),
            cleaned: false,
        };
        fetcher.fetch(package, &native)?;
        Ok(staging)
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Walk the installable part of the staged tree and compute identities.
    pub fn scan(&self, package: &Package) -> Result<IncomingTree> {
        let root = self.path.join(&self.source_subdir).to_native();
        if !root.is_dir() {
            return Err(Error::Fetch {
                package: package.name.clone(),
                message: format!("fetched tree has no '{}' directory", self.source_subdir),
            });
        }

        let mut tree = IncomingTree::default();
        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&root)
                .map(|p| NormalizedPath::new(p).as_str().to_string())
                .map_err(|e| Error::Fetch {
                    package: package.name.clone(),
                    message: e.to_string(),
                })?;

            if entry.file_type().is_dir() {
                tree.dirs.push(relative);
            } else {
                let identity = checksum::identity(entry.path())?;
                tree.files.insert(
                    relative,
                    IncomingFile {
                        source: entry.path().to_path_buf(),
                        identity,
                    },
                );
            }
        }
        debug!(package = %package.name, files = tree.files.len(), dirs = tree.dirs.len(), "scanned incoming tree");
        Ok(tree)
    }

    /// Remove the staging directory. Failure is reported, not raised.
    pub fn cleanup(mut self) -> Option<Warning> {
        self.cleaned = true;
        let native = self.path.to_native();
        match fs::remove_dir_all(&native) {
            Ok(()) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => Some(Warning::CleanupFailed {
                path: self.path.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if !self.cleaned {
            let _ = fs::remove_dir_all(self.path.to_native());
        }
    }
}

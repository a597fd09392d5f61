//! Fetch collaborator: puts a package's file tree into a staging directory

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::package::Package;
use crate::{Error, Result};

/// Something that can materialize a package's files into a directory.
///
/// Implementations own transport and archive handling. Failures are fatal
/// to the calling operation.
pub trait Fetcher {
    fn fetch(&self, package: &Package, destination: &Path) -> Result<()>;
}

/// Fetches from a package checkout that already exists on local disk.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    source: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl Fetcher for DirectoryFetcher {
    fn fetch(&self, package: &Package, destination: &Path) -> Result<()> {
        if !self.source.is_dir() {
            return Err(Error::Fetch {
                package: package.name.clone(),
                message: format!("source {} is not a directory", self.source.display()),
            });
        }

        debug!(package = %package.name, source = %self.source.display(), "copying package source");
        modsync_fs::io::ensure_dir(destination)?;

        for entry in WalkDir::new(&self.source).min_depth(1).follow_links(true) {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&self.source)
                .map_err(|e| Error::Fetch {
                    package: package.name.clone(),
                    message: e.to_string(),
                })?;
            let target = destination.join(relative);

            if entry.file_type().is_dir() {
                modsync_fs::io::ensure_dir(&target)?;
            } else {
                modsync_fs::io::copy_file(entry.path(), &target)?;
            }
        }
        Ok(())
    }
}

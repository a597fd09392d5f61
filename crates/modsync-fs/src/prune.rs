//! File removal followed by pruning of emptied ancestor directories

use std::fs;
use std::io::ErrorKind;

use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// Delete the file at `path`, then remove every ancestor directory that is
/// left empty, stopping at `root` (never removed) or at the first non-empty
/// ancestor.
///
/// A file that is already gone counts as deleted. Returns the directories
/// that were removed, innermost first.
///
/// # Errors
///
/// Returns [`Error::OutsideRoot`] without touching anything when `path` is
/// not strictly inside `root`, and [`Error::Io`] when a deletion fails.
pub fn remove_file_and_prune(path: &NormalizedPath, root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    if path == root || !path.is_within(root) {
        return Err(Error::OutsideRoot {
            path: path.to_native(),
            root: root.to_native(),
        });
    }

    let native = path.to_native();
    match fs::remove_file(&native) {
        Ok(()) => debug!(path = %path, "removed file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path, "file already absent");
        }
        Err(e) => return Err(Error::io(native, e)),
    }

    let mut removed = Vec::new();
    let mut current = path.parent();

    while let Some(dir) = current {
        if dir == *root || !dir.is_within(root) {
            break;
        }

        let native_dir = dir.to_native();
        let is_empty = match fs::read_dir(&native_dir) {
            Ok(mut entries) => entries.next().is_none(),
            // Already gone: keep climbing
            Err(e) if e.kind() == ErrorKind::NotFound => {
                current = dir.parent();
                continue;
            }
            Err(e) => return Err(Error::io(native_dir, e)),
        };

        if !is_empty {
            break;
        }

        fs::remove_dir(&native_dir).map_err(|e| Error::io(&native_dir, e))?;
        debug!(dir = %dir, "pruned empty directory");
        current = dir.parent();
        removed.push(dir);
    }

    Ok(removed)
}

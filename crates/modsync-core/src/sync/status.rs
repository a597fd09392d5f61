//! Status check types
//!
//! Reports how the files on disk differ from a package's baseline, without
//! changing anything.

use serde::{Deserialize, Serialize};

use crate::resolver::{Change, ChangeKind};

/// Overall state of a package's files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    /// Every recorded file is present and unchanged
    Clean,
    /// Some recorded files were edited or deleted
    Changed,
}

/// Report from a status check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub package: String,
    pub status: StatusKind,
    /// Number of files in the baseline
    pub tracked: usize,
    pub changes: Vec<Change>,
}

impl StatusReport {
    pub fn new(package: impl Into<String>, tracked: usize, changes: Vec<Change>) -> Self {
        let status = if changes.is_empty() {
            StatusKind::Clean
        } else {
            StatusKind::Changed
        };
        Self {
            package: package.into(),
            status,
            tracked,
            changes,
        }
    }

    pub fn modified(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.kind == ChangeKind::Modified)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.kind == ChangeKind::Deleted)
    }
}

//! Outcome of an install, update or remove

use serde::{Deserialize, Serialize};

/// Which operation produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Install,
    Update,
    Remove,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Install => "install",
            Self::Update => "update",
            Self::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// Something the operator should know about that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// Update found no baseline; files of the old version may stay behind
    BaselineMissing { path: String },
    /// Incoming content went to a `.new` sibling of a locally edited file
    KeptAsNew { path: String, new_path: String },
    /// A file dropped by the package was locally edited and not removed
    DeleteSkipped { path: String },
    /// A locally deleted file was not recreated
    LeftAbsent { path: String },
    /// The staging directory could not be removed
    CleanupFailed { path: String, message: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BaselineMissing { path } => write!(
                f,
                "cannot find package files DB \"{}\". Ignoring currently installed files, there might be residual files from current installation.",
                path
            ),
            Self::KeptAsNew { path, new_path } => write!(
                f,
                "{} locally modified, new version installed as {}",
                path, new_path
            ),
            Self::DeleteSkipped { path } => {
                write!(f, "{} has been changed, skipped (not removed).", path)
            }
            Self::LeftAbsent { path } => {
                write!(f, "{} was deleted locally, not reinstalled.", path)
            }
            Self::CleanupFailed { path, message } => write!(
                f,
                "Could not delete temporary files in {}: {}",
                path, message
            ),
        }
    }
}

/// What an operation did, path by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub package: String,
    pub operation: Operation,
    /// Files copied into place (created or overwritten)
    pub written: Vec<String>,
    /// Files that needed no write
    pub unchanged: Vec<String>,
    /// Files whose incoming version went to `<path>.new`
    pub kept_as_new: Vec<String>,
    /// Locally deleted files that were not recreated
    pub left_absent: Vec<String>,
    /// Files removed from disk
    pub deleted: Vec<String>,
    /// Files that would have been removed but carry local edits
    pub skipped: Vec<String>,
    /// Directories removed because they became empty
    pub pruned_dirs: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl SyncReport {
    pub fn new(package: impl Into<String>, operation: Operation) -> Self {
        Self {
            package: package.into(),
            operation,
            written: Vec::new(),
            unchanged: Vec::new(),
            kept_as_new: Vec::new(),
            left_absent: Vec::new(),
            deleted: Vec::new(),
            skipped: Vec::new(),
            pruned_dirs: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(package = %self.package, "{}", warning);
        self.warnings.push(warning);
    }

    /// Whether the operation changed anything on disk.
    pub fn touched_files(&self) -> bool {
        !(self.written.is_empty() && self.kept_as_new.is_empty() && self.deleted.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_messages() {
        let kept = Warning::KeptAsNew {
            path: "conf/app.ini".into(),
            new_path: "conf/app.ini.new".into(),
        };
        assert_eq!(
            kept.to_string(),
            "conf/app.ini locally modified, new version installed as conf/app.ini.new"
        );
        let skipped = Warning::DeleteSkipped {
            path: "lib/x.php".into(),
        };
        assert_eq!(
            skipped.to_string(),
            "lib/x.php has been changed, skipped (not removed)."
        );
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let json = serde_json::to_value(Warning::LeftAbsent { path: "a".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "left-absent", "path": "a" }));
    }

    #[test]
    fn fresh_report_touched_nothing() {
        let report = SyncReport::new("blog", Operation::Update);
        assert!(!report.touched_files());
        assert_eq!(report.operation.to_string(), "update");
    }
}

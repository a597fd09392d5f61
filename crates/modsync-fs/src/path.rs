//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Provides consistent path handling across platforms by normalizing
/// all paths to forward slashes internally and converting to
/// platform-native format only at I/O boundaries.
///
/// Normalization also collapses `.` and empty components and resolves `..`
/// lexically. A `..` that would climb above the start of a relative path is
/// dropped, so a normalized relative path can never escape the directory it
/// is later joined onto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    ///
    /// The segment is normalized first, so `..` in it cannot climb above
    /// `self`.
    pub fn join(&self, segment: &str) -> Self {
        let segment = clean(&segment.replace('\\', "/"));
        let segment = segment.trim_start_matches('/');
        if segment.is_empty() || segment == "." {
            return self.clone();
        }
        if self.inner == "." {
            return Self {
                inner: segment.to_string(),
            };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Append a suffix to the final component (`a/b.txt` + `.new` -> `a/b.txt.new`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            inner: format!("{}{}", self.inner, suffix),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) if trimmed.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            None if trimmed != "." && !trimmed.is_empty() => Some(Self {
                inner: ".".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Whether `self` equals `root` or lies underneath it, compared by
    /// whole components.
    pub fn is_within(&self, root: &NormalizedPath) -> bool {
        if root.inner == "." {
            return !self.inner.starts_with('/') && self.inner != ".." && !self.inner.starts_with("../");
        }
        if self.inner == root.inner {
            return true;
        }
        let prefix = root.inner.trim_end_matches('/');
        self.inner
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Express `self` relative to `root`, or `None` if it is not inside it.
    pub fn relative_to(&self, root: &NormalizedPath) -> Option<String> {
        if !self.is_within(root) {
            return None;
        }
        if root.inner == "." {
            return Some(self.inner.clone());
        }
        let rest = &self.inner[root.inner.trim_end_matches('/').len()..];
        Some(rest.trim_start_matches('/').to_string())
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Lexically clean a forward-slash path.
fn clean(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                // Above the root (absolute) or the start (relative): drop it.
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (absolute, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

/// Validate a package name before it is used to build a storage path.
///
/// Names are `name` or `vendor/name`. Each segment must be non-empty, must
/// not be `.` or `..`, and may not contain backslashes or NUL bytes.
pub fn validate_package_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Package name must not be empty".to_string());
    }
    if name.contains('\\') || name.contains('\0') {
        return Err(format!("Package name '{}' contains invalid characters", name));
    }
    let segments: Vec<&str> = name.split('/').collect();
    if segments.len() > 2 {
        return Err(format!(
            "Package name '{}' must be 'name' or 'vendor/name'",
            name
        ));
    }
    for segment in segments {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(format!("Package name '{}' has an invalid segment", name));
        }
    }
    Ok(())
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

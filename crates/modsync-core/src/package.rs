//! Package descriptors handed to the engine by the surrounding package manager

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The package type this installer handles unless configured otherwise.
pub const DEFAULT_PACKAGE_TYPE: &str = "lighp-module";

/// A package as the engine sees it: a stable name and a type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Canonical name, `name` or `vendor/name`
    pub name: String,
    /// Type identifier checked against the supported list
    #[serde(rename = "type")]
    pub package_type: String,
    /// Version label, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Package {
    /// Create a package of the default type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_type: DEFAULT_PACKAGE_TYPE.to_string(),
            version: None,
        }
    }

    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = package_type.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Validate the name for use as a storage key.
    pub fn validate(&self) -> Result<()> {
        modsync_fs::validate_package_name(&self.name).map_err(|reason| {
            Error::InvalidPackageName {
                name: self.name.clone(),
                reason,
            }
        })
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({})", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_type_is_module() {
        assert_eq!(Package::new("blog").package_type, "lighp-module");
    }

    #[test]
    fn display_includes_version() {
        let package = Package::new("lighp/blog").with_version("1.2.0");
        assert_eq!(package.to_string(), "lighp/blog (1.2.0)");
    }

    #[test]
    fn validate_rejects_traversal() {
        let err = Package::new("../etc").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidPackageName { .. }));
    }
}

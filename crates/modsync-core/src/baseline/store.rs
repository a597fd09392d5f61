//! Durable per-package baseline storage

use std::fs::File;
use std::io::Read;

use fs2::FileExt;
use modsync_fs::{ConfigStore, NormalizedPath, remove_file_and_prune};
use tracing::debug;

use super::Baseline;
use crate::{Error, Result};

/// Reads and writes baseline records under `<root>/<db_dir>/<package>.json`.
#[derive(Debug)]
pub struct BaselineStore {
    /// Install root; pruning after record removal stops here
    root: NormalizedPath,
    /// Directory holding the records
    dir: NormalizedPath,
    store: ConfigStore,
}

impl BaselineStore {
    pub fn new(root: NormalizedPath, db_dir: &str) -> Self {
        let dir = root.join(db_dir);
        Self {
            root,
            dir,
            store: ConfigStore::new(),
        }
    }

    /// Path of the record for `package`.
    pub fn path(&self, package: &str) -> Result<NormalizedPath> {
        modsync_fs::validate_package_name(package).map_err(|reason| {
            Error::InvalidPackageName {
                name: package.to_string(),
                reason,
            }
        })?;
        Ok(self.dir.join(&format!("{}.json", package)))
    }

    /// Whether a record exists for `package`.
    pub fn exists(&self, package: &str) -> Result<bool> {
        Ok(self.path(package)?.is_file())
    }

    /// Load the record for `package` under a shared lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record exists, and
    /// [`Error::InvalidBaseline`] if it names a path outside the install root.
    pub fn load(&self, package: &str) -> Result<Baseline> {
        let path = self.path(package)?;
        let native = path.to_native();

        let file = match File::open(&native) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    package: package.to_string(),
                    path: native,
                });
            }
            Err(e) => return Err(modsync_fs::Error::io(native, e).into()),
        };
        FileExt::lock_shared(&file)
            .map_err(|_| modsync_fs::Error::LockFailed { path: native.clone() })?;

        // Read through the locked handle
        let mut content = String::new();
        (&file)
            .read_to_string(&mut content)
            .map_err(|e| modsync_fs::Error::io(&native, e))?;

        let baseline: Baseline = self.store.parse(&path, &content)?;
        baseline.validate(package)?;
        debug!(package, files = baseline.len(), "loaded baseline");
        Ok(baseline)
    }

    /// Replace the record for `package`.
    ///
    /// The write is atomic: on failure the previous record is left as it was.
    pub fn save(&self, package: &str, baseline: &Baseline) -> Result<()> {
        let path = self.path(package)?;
        self.store.save(&path, baseline)?;
        debug!(package, files = baseline.len(), path = %path, "saved baseline");
        Ok(())
    }

    /// Delete the record for `package` and prune emptied parent directories.
    ///
    /// Returns the pruned directories.
    pub fn remove(&self, package: &str) -> Result<Vec<NormalizedPath>> {
        let path = self.path(package)?;
        Ok(remove_file_and_prune(&path, &self.root)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modsync_fs::FileIdentity;

    fn store_in(dir: &std::path::Path) -> BaselineStore {
        BaselineStore::new(NormalizedPath::new(dir), "var/lib/modsync")
    }

    #[test]
    fn path_uses_package_name() {
        let store = BaselineStore::new(NormalizedPath::new("/srv"), "var/lib/modsync");
        assert_eq!(
            store.path("lighp/blog").unwrap().as_str(),
            "/srv/var/lib/modsync/lighp/blog.json"
        );
        assert!(store.path("../x").is_err());
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(!store.exists("blog").unwrap());
        assert!(matches!(store.load("blog"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn save_load_remove_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let mut baseline = Baseline::new();
        baseline.insert("lib/a.php", FileIdentity::of_bytes(b"a"));

        store.save("vendor/blog", &baseline).unwrap();
        assert!(store.exists("vendor/blog").unwrap());
        assert_eq!(store.load("vendor/blog").unwrap(), baseline);

        let pruned = store.remove("vendor/blog").unwrap();
        assert!(!store.exists("vendor/blog").unwrap());
        // vendor, modsync, lib, var all emptied
        assert_eq!(pruned.len(), 4);
        assert!(!dir.path().join("var").exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn load_rejects_escaping_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let record = dir.path().join("var/lib/modsync/blog.json");
        std::fs::create_dir_all(record.parent().unwrap()).unwrap();
        std::fs::write(&record, r#"{"../../etc/passwd": {"size": 1, "md5sum": "x"}}"#).unwrap();

        assert!(matches!(store.load("blog"), Err(Error::InvalidBaseline { .. })));
    }
}

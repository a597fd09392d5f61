//! SyncEngine implementation
//!
//! The SyncEngine reconciles a package's files on disk with a freshly
//! fetched tree, using the package's baseline to tell untouched files from
//! locally edited ones.

use std::path::Path;

use modsync_fs::{FileIdentity, InstallPath, NormalizedPath, checksum, remove_file_and_prune};
use tracing::{debug, info};

use super::report::{Operation, SyncReport, Warning};
use super::staging::{IncomingTree, Staging};
use super::status::StatusReport;
use crate::baseline::{Baseline, BaselineStore};
use crate::config::InstallContext;
use crate::fetch::Fetcher;
use crate::package::Package;
use crate::reconcile::{Action, LocalChanges, local_change, reconcile};
use crate::resolver::{self, Change, PromptIo, ResolverState};
use crate::{Error, Result};

/// Engine for installing, updating and removing package files
///
/// Each operation runs start to finish on one package and keeps no state
/// between calls apart from the baseline records.
pub struct SyncEngine<'a> {
    ctx: InstallContext,
    store: BaselineStore,
    /// Asked about local changes when the context is interactive
    operator: Option<&'a mut dyn PromptIo>,
}

impl<'a> SyncEngine<'a> {
    pub fn new(ctx: InstallContext) -> Self {
        let store = BaselineStore::new(ctx.root.clone(), &ctx.settings.db_dir);
        Self {
            ctx,
            store,
            operator: None,
        }
    }

    /// Attach the operator consulted by the conflict prompt.
    pub fn with_operator(mut self, operator: &'a mut dyn PromptIo) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn context(&self) -> &InstallContext {
        &self.ctx
    }

    pub fn store(&self) -> &BaselineStore {
        &self.store
    }

    /// Install a package that has no prior baseline.
    ///
    /// Every incoming file is copied unconditionally and recorded.
    ///
    /// # Errors
    ///
    /// Fails on the first copy error, leaving already copied files in place
    /// and no baseline written.
    pub fn install(&mut self, package: &Package, fetcher: &dyn Fetcher) -> Result<SyncReport> {
        self.check_supported(package)?;
        info!(package = %package, "installing");

        let mut report = SyncReport::new(&package.name, Operation::Install);
        let staging = Staging::fetch(&self.ctx, package, fetcher)?;
        let incoming = staging.scan(package)?;

        self.ensure_dirs(&incoming)?;
        let mut baseline = Baseline::new();
        for (path, file) in &incoming.files {
            self.copy(&file.source, &self.target(path))?;
            baseline.insert(path.clone(), &file.identity);
            report.written.push(path.clone());
        }

        if let Some(warning) = staging.cleanup() {
            report.warn(warning);
        }

        self.store.save(&package.name, &baseline)?;
        info!(package = %package, files = baseline.len(), "installed");
        Ok(report)
    }

    /// Replace `initial` with `target`, preserving local edits.
    ///
    /// Files edited since the baseline are not overwritten: the incoming
    /// version is written next to them as `<path>.new` and the path is no
    /// longer tracked. Files the new version no longer ships are deleted
    /// only if unchanged since the baseline.
    pub fn update(
        &mut self,
        initial: &Package,
        target: &Package,
        fetcher: &dyn Fetcher,
    ) -> Result<SyncReport> {
        self.check_supported(initial)?;
        self.check_supported(target)?;
        info!(from = %initial, to = %target, "updating");

        let mut report = SyncReport::new(&target.name, Operation::Update);
        let old = match self.store.load(&initial.name) {
            Ok(baseline) => baseline,
            Err(Error::NotFound { path, .. }) => {
                report.warn(Warning::BaselineMissing {
                    path: path.display().to_string(),
                });
                Baseline::new()
            }
            Err(e) => return Err(e),
        };

        let staging = Staging::fetch(&self.ctx, target, fetcher)?;
        let incoming = staging.scan(target)?;

        // Decided before any file is touched
        let changes = self.update_changes(&old, &incoming)?;
        let policy = self.resolve(&target.name, changes)?;

        self.ensure_dirs(&incoming)?;
        let mut baseline = Baseline::new();
        for (path, file) in &incoming.files {
            let target_path = self.target(path);
            let recorded = old.get(path).map(|r| r.identity());
            let on_disk = self.on_disk(&target_path)?;
            let action = reconcile(recorded.as_ref(), on_disk.as_ref(), Some(&file.identity), policy);
            debug!(path = %path, ?action, "incoming file");

            match action {
                Action::Create | Action::OverwriteSafe => {
                    self.copy(&file.source, &target_path)?;
                    report.written.push(path.clone());
                }
                Action::Unchanged => report.unchanged.push(path.clone()),
                Action::KeepAsNew => {
                    let new_path = target_path.with_suffix(InstallPath::NewSuffix.as_str());
                    self.copy(&file.source, &new_path)?;
                    report.kept_as_new.push(path.clone());
                    report.warn(Warning::KeptAsNew {
                        path: path.clone(),
                        new_path: format!("{}{}", path, InstallPath::NewSuffix),
                    });
                }
                Action::LeaveAbsent => {
                    report.left_absent.push(path.clone());
                    report.warn(Warning::LeftAbsent { path: path.clone() });
                }
                Action::DeleteSafe | Action::DeleteSkipped | Action::Gone | Action::NotTracked => {}
            }

            if action.is_tracked() {
                baseline.insert(path.clone(), &file.identity);
            }
        }

        if let Some(warning) = staging.cleanup() {
            report.warn(warning);
        }

        // Paths still shipped were handled above, whether tracked or not
        let dropped = old.iter().filter(|(path, _)| !incoming.contains(path));
        for (path, record) in dropped {
            self.delete_if_unchanged(path, &record.identity(), policy, &mut report)?;
        }

        self.store.save(&target.name, &baseline)?;
        if initial.name != target.name {
            let pruned = self.store.remove(&initial.name)?;
            report.pruned_dirs.extend(self.relative(&pruned));
        }

        info!(
            package = %target,
            written = report.written.len(),
            kept_as_new = report.kept_as_new.len(),
            deleted = report.deleted.len(),
            "updated"
        );
        Ok(report)
    }

    /// Delete every recorded file that is unchanged since the baseline, then
    /// the baseline record itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] without deleting anything if the package
    /// has no baseline.
    pub fn remove(&mut self, package: &Package) -> Result<SyncReport> {
        self.check_supported(package)?;
        info!(package = %package, "removing");

        let baseline = self.store.load(&package.name)?;
        let mut report = SyncReport::new(&package.name, Operation::Remove);

        let changes = self.recorded_changes(&baseline)?;
        let policy = self.resolve(&package.name, changes)?;

        for (path, record) in baseline.iter() {
            self.delete_if_unchanged(path, &record.identity(), policy, &mut report)?;
        }

        let pruned = self.store.remove(&package.name)?;
        report.pruned_dirs.extend(self.relative(&pruned));

        info!(
            package = %package,
            deleted = report.deleted.len(),
            skipped = report.skipped.len(),
            "removed"
        );
        Ok(report)
    }

    /// Compare the baseline with the disk without changing anything.
    pub fn status(&self, package: &Package) -> Result<StatusReport> {
        package.validate()?;
        let baseline = self.store.load(&package.name)?;
        let changes = self.recorded_changes(&baseline)?;
        Ok(StatusReport::new(&package.name, baseline.len(), changes))
    }

    fn check_supported(&self, package: &Package) -> Result<()> {
        package.validate()?;
        if !self.ctx.settings.supports(&package.package_type) {
            return Err(Error::UnsupportedType {
                package: package.name.clone(),
                package_type: package.package_type.clone(),
            });
        }
        Ok(())
    }

    fn target(&self, relative: &str) -> NormalizedPath {
        self.ctx.root.join(relative)
    }

    /// Pruned directories, relative to the install root.
    fn relative(&self, dirs: &[NormalizedPath]) -> Vec<String> {
        dirs.iter()
            .map(|d| d.relative_to(&self.ctx.root).unwrap_or_else(|| d.to_string()))
            .collect()
    }

    fn on_disk(&self, path: &NormalizedPath) -> Result<Option<FileIdentity>> {
        Ok(checksum::identity_if_exists(&path.to_native())?)
    }

    fn ensure_dirs(&self, incoming: &IncomingTree) -> Result<()> {
        for dir in &incoming.dirs {
            modsync_fs::io::ensure_dir(&self.target(dir).to_native())?;
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &NormalizedPath) -> Result<()> {
        modsync_fs::io::copy_file(from, &to.to_native())
            .map(|_| ())
            .map_err(|cause| Error::Copy {
                from: from.to_path_buf(),
                to: to.to_native(),
                cause,
            })
    }

    /// Apply the deletion-safety rule to one recorded path.
    fn delete_if_unchanged(
        &self,
        path: &str,
        recorded: &FileIdentity,
        policy: LocalChanges,
        report: &mut SyncReport,
    ) -> Result<()> {
        let target = self.target(path);
        let on_disk = self.on_disk(&target)?;
        let action = reconcile(Some(recorded), on_disk.as_ref(), None, policy);
        debug!(path = %path, ?action, "recorded file");

        match action {
            Action::DeleteSafe => {
                let pruned = remove_file_and_prune(&target, &self.ctx.root)?;
                report.deleted.push(path.to_string());
                report.pruned_dirs.extend(self.relative(&pruned));
            }
            Action::DeleteSkipped => {
                report.skipped.push(path.to_string());
                report.warn(Warning::DeleteSkipped {
                    path: path.to_string(),
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// Local changes an update would run into.
    fn update_changes(&self, old: &Baseline, incoming: &IncomingTree) -> Result<Vec<Change>> {
        if !self.settles_changes() {
            return Ok(Vec::new());
        }

        let mut changes = Vec::new();
        for (path, file) in &incoming.files {
            let recorded = old.get(path).map(|r| r.identity());
            let on_disk = self.on_disk(&self.target(path))?;
            if let Some(kind) = local_change(recorded.as_ref(), on_disk.as_ref(), Some(&file.identity)) {
                changes.push(Change::new(kind, path.clone()));
            }
        }
        for (path, record) in old.iter().filter(|(path, _)| !incoming.contains(path)) {
            let on_disk = self.on_disk(&self.target(path))?;
            if let Some(kind) = local_change(Some(&record.identity()), on_disk.as_ref(), None) {
                changes.push(Change::new(kind, path));
            }
        }
        Ok(changes)
    }

    /// Recorded paths whose files were edited or deleted.
    fn recorded_changes(&self, baseline: &Baseline) -> Result<Vec<Change>> {
        let mut changes = Vec::new();
        for (path, record) in baseline.iter() {
            let on_disk = self.on_disk(&self.target(path))?;
            if let Some(kind) = local_change(Some(&record.identity()), on_disk.as_ref(), None) {
                changes.push(Change::new(kind, path));
            }
        }
        Ok(changes)
    }

    /// Local changes are weighed only when someone may ask about them or
    /// the settings already say to discard them.
    fn settles_changes(&self) -> bool {
        self.ctx.settings.prompt_on_conflict || self.ctx.settings.discard_changes
    }

    /// Settle how local changes are treated for this run.
    fn resolve(&mut self, package: &str, changes: Vec<Change>) -> Result<LocalChanges> {
        if !self.settles_changes() || changes.is_empty() {
            return Ok(LocalChanges::Protect);
        }
        info!(package, changes = changes.len(), "local changes detected");

        let ask = self.ctx.settings.prompt_on_conflict && self.ctx.interactive;
        let state = match (ask, self.operator.as_deref_mut()) {
            (true, Some(operator)) => resolver::prompt(&changes, operator)?,
            _ => resolver::policy(self.ctx.settings.discard_changes),
        };

        match state {
            ResolverState::Resolved { discard: true } => Ok(LocalChanges::Discard),
            ResolverState::Resolved { discard: false } => Ok(LocalChanges::Keep),
            ResolverState::Aborted | ResolverState::Prompting => Err(Error::Aborted {
                package: package.to_string(),
            }),
        }
    }
}

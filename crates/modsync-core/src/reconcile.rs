//! Three-way file reconciliation
//!
//! Every decision the engine makes about a single path is a pure function of
//! up to three identities of that path:
//!
//! - the **baseline**: what was recorded at the last install/update
//! - the **on-disk** file as it is now
//! - the **incoming** file from the freshly fetched tree
//!
//! `None` means "no such file". Nothing here touches the filesystem.

use modsync_fs::{FileIdentity, unchanged};
use serde::{Deserialize, Serialize};

use crate::resolver::ChangeKind;

/// What to do with one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Nothing on disk yet: copy the incoming file into place
    Create,
    /// Nothing to write; record the incoming identity
    Unchanged,
    /// The on-disk file carries no local edits: replace it
    OverwriteSafe,
    /// The on-disk file carries local edits: install incoming as `<path>.new`
    KeepAsNew,
    /// A locally deleted file stays deleted
    LeaveAbsent,
    /// No longer shipped and untouched since the baseline: delete it
    DeleteSafe,
    /// No longer shipped but locally edited: leave it in place
    DeleteSkipped,
    /// No longer shipped and already gone
    Gone,
    /// Not recorded in the baseline and not shipped: never ours to touch
    NotTracked,
}

impl Action {
    /// Whether the path ends up recorded in the new baseline.
    pub fn is_tracked(self) -> bool {
        matches!(self, Self::Create | Self::Unchanged | Self::OverwriteSafe)
    }
}

/// How local edits are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalChanges {
    /// Nobody was asked. Edited tracked files are preserved, everything else
    /// follows the incoming tree.
    #[default]
    Protect,
    /// The operator chose to keep local changes: edited, untracked and
    /// deleted files are all left as they are.
    Keep,
    /// The operator chose to discard local changes: the incoming tree wins.
    Discard,
}

/// Decide what to do with one path.
///
/// Paths in the incoming tree yield one of the copy actions; paths only in
/// the baseline yield one of the delete actions.
pub fn reconcile(
    baseline: Option<&FileIdentity>,
    on_disk: Option<&FileIdentity>,
    incoming: Option<&FileIdentity>,
    policy: LocalChanges,
) -> Action {
    match incoming {
        Some(incoming) => plan_copy(baseline, on_disk, incoming, policy),
        None => plan_delete(baseline, on_disk, policy),
    }
}

fn plan_copy(
    baseline: Option<&FileIdentity>,
    on_disk: Option<&FileIdentity>,
    incoming: &FileIdentity,
    policy: LocalChanges,
) -> Action {
    let Some(on_disk) = on_disk else {
        return match (baseline, policy) {
            (Some(_), LocalChanges::Keep) => Action::LeaveAbsent,
            _ => Action::Create,
        };
    };

    if unchanged(on_disk, incoming) {
        return Action::Unchanged;
    }

    match baseline {
        None if policy == LocalChanges::Keep => Action::KeepAsNew,
        None => Action::OverwriteSafe,
        Some(baseline) if unchanged(on_disk, baseline) => Action::OverwriteSafe,
        // Locally edited from here on
        Some(_) if policy == LocalChanges::Discard => Action::OverwriteSafe,
        // Upstream did not change this file: nothing new to offer
        Some(baseline) if unchanged(baseline, incoming) => Action::Unchanged,
        Some(_) => Action::KeepAsNew,
    }
}

fn plan_delete(
    baseline: Option<&FileIdentity>,
    on_disk: Option<&FileIdentity>,
    policy: LocalChanges,
) -> Action {
    match (baseline, on_disk) {
        (None, _) => Action::NotTracked,
        (Some(_), None) => Action::Gone,
        (Some(baseline), Some(on_disk)) => {
            if unchanged(on_disk, baseline) || policy == LocalChanges::Discard {
                Action::DeleteSafe
            } else {
                Action::DeleteSkipped
            }
        }
    }
}

/// Classify the local state of one path for the conflict listing.
///
/// Returns `None` when there is nothing the operator needs to hear about.
pub fn local_change(
    baseline: Option<&FileIdentity>,
    on_disk: Option<&FileIdentity>,
    incoming: Option<&FileIdentity>,
) -> Option<ChangeKind> {
    match (baseline, on_disk) {
        (Some(_), None) => Some(ChangeKind::Deleted),
        (Some(baseline), Some(on_disk)) => {
            let edited = !unchanged(on_disk, baseline);
            let already_incoming = incoming.is_some_and(|inc| unchanged(on_disk, inc));
            (edited && !already_incoming).then_some(ChangeKind::Modified)
        }
        (None, Some(on_disk)) => {
            let collides = incoming.is_some_and(|inc| !unchanged(on_disk, inc));
            collides.then_some(ChangeKind::Added)
        }
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn id(content: &str) -> FileIdentity {
        FileIdentity::of_bytes(content.as_bytes())
    }

    #[rstest]
    // incoming present, nothing on disk
    #[case(None, None, "v2", LocalChanges::Protect, Action::Create)]
    #[case(Some("v1"), None, "v2", LocalChanges::Protect, Action::Create)]
    #[case(Some("v1"), None, "v2", LocalChanges::Keep, Action::LeaveAbsent)]
    #[case(Some("v1"), None, "v2", LocalChanges::Discard, Action::Create)]
    // disk already matches incoming
    #[case(Some("v1"), Some("v2"), "v2", LocalChanges::Protect, Action::Unchanged)]
    #[case(None, Some("v2"), "v2", LocalChanges::Keep, Action::Unchanged)]
    // untouched since baseline
    #[case(Some("v1"), Some("v1"), "v2", LocalChanges::Protect, Action::OverwriteSafe)]
    #[case(Some("v1"), Some("v1"), "v2", LocalChanges::Keep, Action::OverwriteSafe)]
    // no baseline entry
    #[case(None, Some("local"), "v2", LocalChanges::Protect, Action::OverwriteSafe)]
    #[case(None, Some("local"), "v2", LocalChanges::Keep, Action::KeepAsNew)]
    #[case(None, Some("local"), "v2", LocalChanges::Discard, Action::OverwriteSafe)]
    // locally edited
    #[case(Some("v1"), Some("edited"), "v2", LocalChanges::Protect, Action::KeepAsNew)]
    #[case(Some("v1"), Some("edited"), "v2", LocalChanges::Keep, Action::KeepAsNew)]
    #[case(Some("v1"), Some("edited"), "v2", LocalChanges::Discard, Action::OverwriteSafe)]
    // locally edited, upstream unchanged
    #[case(Some("v1"), Some("edited"), "v1", LocalChanges::Protect, Action::Unchanged)]
    #[case(Some("v1"), Some("edited"), "v1", LocalChanges::Discard, Action::OverwriteSafe)]
    fn copy_decisions(
        #[case] baseline: Option<&str>,
        #[case] on_disk: Option<&str>,
        #[case] incoming: &str,
        #[case] policy: LocalChanges,
        #[case] expected: Action,
    ) {
        let baseline = baseline.map(id);
        let on_disk = on_disk.map(id);
        let incoming = id(incoming);
        assert_eq!(
            reconcile(baseline.as_ref(), on_disk.as_ref(), Some(&incoming), policy),
            expected
        );
    }

    #[rstest]
    #[case(Some("v1"), Some("v1"), LocalChanges::Protect, Action::DeleteSafe)]
    #[case(Some("v1"), Some("edited"), LocalChanges::Protect, Action::DeleteSkipped)]
    #[case(Some("v1"), Some("edited"), LocalChanges::Keep, Action::DeleteSkipped)]
    #[case(Some("v1"), Some("edited"), LocalChanges::Discard, Action::DeleteSafe)]
    #[case(Some("v1"), None, LocalChanges::Protect, Action::Gone)]
    #[case(None, Some("other"), LocalChanges::Discard, Action::NotTracked)]
    fn delete_decisions(
        #[case] baseline: Option<&str>,
        #[case] on_disk: Option<&str>,
        #[case] policy: LocalChanges,
        #[case] expected: Action,
    ) {
        let baseline = baseline.map(id);
        let on_disk = on_disk.map(id);
        assert_eq!(
            reconcile(baseline.as_ref(), on_disk.as_ref(), None, policy),
            expected
        );
    }

    #[test]
    fn same_size_different_content_is_a_change() {
        let baseline = id("aaaa");
        let on_disk = id("bbbb");
        assert_eq!(baseline.size, on_disk.size);
        assert_eq!(
            reconcile(Some(&baseline), Some(&on_disk), None, LocalChanges::Protect),
            Action::DeleteSkipped
        );
    }

    #[rstest]
    #[case(Some("v1"), None, Some("v2"), Some(ChangeKind::Deleted))]
    #[case(Some("v1"), Some("edited"), Some("v2"), Some(ChangeKind::Modified))]
    #[case(Some("v1"), Some("edited"), None, Some(ChangeKind::Modified))]
    #[case(Some("v1"), Some("v2"), Some("v2"), None)]
    #[case(Some("v1"), Some("v1"), Some("v2"), None)]
    #[case(None, Some("local"), Some("v2"), Some(ChangeKind::Added))]
    #[case(None, Some("v2"), Some("v2"), None)]
    #[case(None, Some("local"), None, None)]
    fn local_change_listing(
        #[case] baseline: Option<&str>,
        #[case] on_disk: Option<&str>,
        #[case] incoming: Option<&str>,
        #[case] expected: Option<ChangeKind>,
    ) {
        let baseline = baseline.map(id);
        let on_disk = on_disk.map(id);
        let incoming = incoming.map(id);
        assert_eq!(
            local_change(baseline.as_ref(), on_disk.as_ref(), incoming.as_ref()),
            expected
        );
    }
}

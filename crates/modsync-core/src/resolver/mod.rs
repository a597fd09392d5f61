//! Conflict resolution for locally changed files
//!
//! When an update or removal would touch files the user changed, the engine
//! asks once whether those changes should be discarded. The question is
//! answered either by an operator through a [`PromptIo`] channel or, when
//! nobody can be asked, by the configured `discard-changes` policy.
//!
//! The decision logic lives in [`ConflictResolver`], an explicit state
//! machine fed one input line at a time. The I/O side only carries lines
//! back and forth, so a scripted operator can stand in for a terminal.

mod machine;
mod prompt;

pub use machine::{ConflictResolver, HELP, LISTING_LIMIT, QUESTION, ResolverState};
pub use prompt::{ChannelPrompt, PromptIo};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Result;

/// Kind of local change, with its one-letter listing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// `M`: a tracked file whose content differs from the baseline
    Modified,
    /// `A`: an untracked local file at a path the incoming tree ships
    Added,
    /// `D`: a tracked file that was deleted locally
    Deleted,
}

impl ChangeKind {
    pub fn flag(self) -> char {
        match self {
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Deleted => 'D',
        }
    }
}

/// One locally changed path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    /// Path relative to the install root
    pub path: String,
}

impl Change {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Listing line, e.g. `    M lib/Blog.php`.
    pub fn listing(&self) -> String {
        format!("    {} {}", self.kind.flag(), self.path)
    }
}

/// Ask the operator until the state machine leaves `Prompting`.
///
/// Blocks on the operator with no timeout.
///
/// # Errors
///
/// Returns an error if the operator channel fails.
pub fn prompt(changes: &[Change], operator: &mut dyn PromptIo) -> Result<ResolverState> {
    let mut resolver = ConflictResolver::new(changes.to_vec());
    operator.write(&resolver.intro());

    while resolver.state() == ResolverState::Prompting {
        let answer = operator.ask(QUESTION, "?")?;
        debug!(answer = %answer, "operator answered");
        let output = resolver.handle(&answer);
        if !output.is_empty() {
            operator.write(&output);
        }
    }

    info!(state = ?resolver.state(), "conflict resolution finished");
    Ok(resolver.state())
}

/// Resolution when nobody can be asked.
pub fn policy(discard_changes: bool) -> ResolverState {
    debug!(discard_changes, "resolving local changes by policy");
    ResolverState::Resolved {
        discard: discard_changes,
    }
}

//! The discard-changes prompt as a state machine

use super::Change;

/// Number of changes listed before the question is first asked.
pub const LISTING_LIMIT: usize = 10;

/// The question put to the operator.
pub const QUESTION: &str = " Discard changes [y,n,a,v,?]?";

/// Printed for `?` and for any input that is not a known answer.
pub const HELP: [&str; 5] = [
    " y - discard changes and apply the update/uninstall",
    " n - keep changed files and apply the update/uninstall",
    " a - abort the update/uninstall and let you manually clean things up",
    " v - view modified files",
    " ? - print help",
];

/// Where the prompt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    /// Waiting for an answer
    Prompting,
    /// Answered; `discard` says whether local changes may be overwritten
    Resolved { discard: bool },
    /// The operator aborted; nothing may be written
    Aborted,
}

/// Decision component of the prompt. Consumes one input line at a time and
/// returns the lines to print in response.
#[derive(Debug, Clone)]
pub struct ConflictResolver {
    changes: Vec<Change>,
    state: ResolverState,
}

impl ConflictResolver {
    pub fn new(changes: Vec<Change>) -> Self {
        Self {
            changes,
            state: ResolverState::Prompting,
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Lines shown before the first question: a header, the first
    /// [`LISTING_LIMIT`] changes, and a count of the rest.
    pub fn intro(&self) -> Vec<String> {
        let mut lines = vec!["    The package has modified files:".to_string()];
        lines.extend(self.changes.iter().take(LISTING_LIMIT).map(Change::listing));
        if self.changes.len() > LISTING_LIMIT {
            lines.push(format!(
                " {} more files modified, choose \"v\" to view the full list",
                self.changes.len() - LISTING_LIMIT
            ));
        }
        lines
    }

    /// Feed one answer. Input after the machine has left `Prompting` is
    /// ignored.
    pub fn handle(&mut self, input: &str) -> Vec<String> {
        if self.state != ResolverState::Prompting {
            return Vec::new();
        }

        match input.trim() {
            "y" => {
                self.state = ResolverState::Resolved { discard: true };
                Vec::new()
            }
            "n" => {
                self.state = ResolverState::Resolved { discard: false };
                Vec::new()
            }
            "a" => {
                self.state = ResolverState::Aborted;
                Vec::new()
            }
            "v" => self.changes.iter().map(Change::listing).collect(),
            _ => HELP.iter().map(|line| line.to_string()).collect(),
        }
    }
}

//! Install context from the command line
//!
//! Resolves the install root, loads its settings file and applies the
//! global flags on top.

use std::io::IsTerminal;

use modsync_core::{InstallContext, Settings};
use modsync_fs::NormalizedPath;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Build the context every command runs in.
pub fn install_context(cli: &Cli) -> Result<InstallContext> {
    let root = dunce::canonicalize(&cli.root).map_err(|e| {
        CliError::user(format!(
            "install root {} is not accessible: {}",
            cli.root.display(),
            e
        ))
    })?;
    let root = NormalizedPath::new(root);

    let mut settings = Settings::load(&root)?;
    apply_overrides(&mut settings, cli);

    let interactive = !cli.no_interaction && std::io::stdin().is_terminal();
    tracing::debug!(root = %root, interactive, "install context ready");
    Ok(InstallContext::new(root, settings).interactive(interactive))
}

/// Flags can switch settings on, never off.
fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if cli.discard_changes {
        settings.discard_changes = true;
    }
    if cli.prompt_on_conflict {
        settings.prompt_on_conflict = true;
    }
}

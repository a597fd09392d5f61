//! Status command implementation

use colored::Colorize;
use modsync_core::{ChangeKind, InstallContext, Package, StatusKind, SyncEngine};

use crate::error::Result;

/// Run the status command
pub fn run_status(ctx: InstallContext, package: &Package, json: bool) -> Result<()> {
    let report = SyncEngine::new(ctx).status(package)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}:   {}", "Package".dimmed(), report.package.cyan());
    println!("{}:   {} files", "Tracked".dimmed(), report.tracked);

    match report.status {
        StatusKind::Clean => println!("{}", "No local changes".green()),
        StatusKind::Changed => {
            println!("{}", "Local changes:".yellow().bold());
            for change in &report.changes {
                let flag = change.kind.flag().to_string();
                let flag = match change.kind {
                    ChangeKind::Deleted => flag.red(),
                    ChangeKind::Added => flag.green(),
                    ChangeKind::Modified => flag.yellow(),
                };
                println!("    {} {}", flag, change.path);
            }
        }
    }
    Ok(())
}

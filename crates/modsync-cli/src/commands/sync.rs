//! Install, update and remove commands

use std::path::Path;

use colored::Colorize;
use modsync_core::{DirectoryFetcher, InstallContext, Package, SyncEngine, SyncReport};

use crate::error::Result;
use crate::interactive::TerminalPrompt;

/// Run the install command
pub fn run_install(ctx: InstallContext, package: &Package, source: &Path, json: bool) -> Result<()> {
    let fetcher = DirectoryFetcher::new(source);
    let report = with_engine(ctx, |engine| engine.install(package, &fetcher))?;
    print_report(&report, json)
}

/// Run the update command
pub fn run_update(
    ctx: InstallContext,
    initial: &Package,
    target: &Package,
    source: &Path,
    json: bool,
) -> Result<()> {
    let fetcher = DirectoryFetcher::new(source);
    let report = with_engine(ctx, |engine| engine.update(initial, target, &fetcher))?;
    print_report(&report, json)
}

/// Run the remove command
pub fn run_remove(ctx: InstallContext, package: &Package, json: bool) -> Result<()> {
    let report = with_engine(ctx, |engine| engine.remove(package))?;
    print_report(&report, json)
}

/// Run `op` on an engine that can ask the terminal about local changes.
///
/// The engine only asks when the context is interactive.
fn with_engine<T>(
    ctx: InstallContext,
    op: impl FnOnce(&mut SyncEngine<'_>) -> modsync_core::Result<T>,
) -> Result<T> {
    let mut terminal = TerminalPrompt;
    let mut engine = SyncEngine::new(ctx).with_operator(&mut terminal);
    Ok(op(&mut engine)?)
}

fn print_report(report: &SyncReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        report.operation.to_string().green().bold(),
        report.package.cyan()
    );
    for path in &report.written {
        println!("  {} {}", "+".green(), path);
    }
    for path in &report.kept_as_new {
        println!("  {} {} ({})", "~".yellow(), path, "kept, new version in .new".dimmed());
    }
    for path in &report.deleted {
        println!("  {} {}", "-".red(), path);
    }
    for path in &report.skipped {
        println!("  {} {} ({})", "!".yellow(), path, "changed, not removed".dimmed());
    }
    if !report.touched_files() {
        println!("  {}", "Nothing to do".dimmed());
    }
    Ok(())
}

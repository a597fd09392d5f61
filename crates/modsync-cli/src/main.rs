//! modsync CLI
//!
//! Installs, updates and removes package files under an install root,
//! keeping files the user edited.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod logging;

use clap::Parser;
use colored::Colorize;
use modsync_core::{InstallContext, Package};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    let ctx = context::install_context(&cli)?;
    execute_command(cli.command, ctx)
}

fn execute_command(cmd: Commands, ctx: InstallContext) -> Result<()> {
    match cmd {
        Commands::Install {
            package,
            source,
            json,
        } => commands::run_install(ctx, &package.to_package(), &source, json),
        Commands::Update {
            package,
            source,
            from_version,
            json,
        } => {
            let target = package.to_package();
            let mut initial = Package::new(&target.name).with_type(&target.package_type);
            if let Some(version) = from_version {
                initial = initial.with_version(version);
            }
            commands::run_update(ctx, &initial, &target, &source, json)
        }
        Commands::Remove { package, json } => commands::run_remove(ctx, &package.to_package(), json),
        Commands::Status { package, json } => commands::run_status(ctx, &package.to_package(), json),
    }
}

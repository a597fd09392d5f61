//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use modsync_core::{DEFAULT_PACKAGE_TYPE, Package};

/// modsync - Install, update and remove package files without losing local edits
#[derive(Parser, Debug)]
#[command(name = "modsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Install root shared by all packages
    #[arg(long, global = true, env = "MODSYNC_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Never prompt; resolve local changes by policy
    #[arg(short = 'n', long, global = true)]
    pub no_interaction: bool,

    /// Discard local changes instead of keeping them, unless the operator is asked
    #[arg(long, global = true)]
    pub discard_changes: bool,

    /// Ask before update or remove touches locally changed files
    #[arg(long, global = true)]
    pub prompt_on_conflict: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install a package that is not installed yet
    ///
    /// Examples:
    ///   modsync install blog --source ./checkouts/blog
    ///   modsync install acme/blog --source ../blog --json
    Install {
        #[command(flatten)]
        package: PackageArgs,

        /// Package checkout to install from
        #[arg(short, long)]
        source: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update an installed package, keeping local edits
    ///
    /// Locally edited files are not overwritten; the new version is written
    /// next to them as `<file>.new`.
    Update {
        #[command(flatten)]
        package: PackageArgs,

        /// Package checkout of the new version
        #[arg(short, long)]
        source: PathBuf,

        /// Version being replaced, for log output
        #[arg(long)]
        from_version: Option<String>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove an installed package's unchanged files
    Remove {
        #[command(flatten)]
        package: PackageArgs,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which installed files were edited or deleted
    Status {
        #[command(flatten)]
        package: PackageArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Identifies the package an operation applies to
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PackageArgs {
    /// Package name, `name` or `vendor/name`
    pub name: String,

    /// Package type
    #[arg(short = 't', long = "type", default_value = DEFAULT_PACKAGE_TYPE)]
    pub package_type: String,

    /// Package version, for log output
    #[arg(long = "pkg-version")]
    pub version: Option<String>,
}

impl PackageArgs {
    pub fn to_package(&self) -> Package {
        let package = Package::new(&self.name).with_type(&self.package_type);
        match &self.version {
            Some(version) => package.with_version(version),
            None => package,
        }
    }
}

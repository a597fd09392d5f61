//! Filesystem layer for modsync
//!
//! Provides normalized path handling, the checksum comparator used to
//! classify installed files, crash-safe I/O for baseline records, and the
//! directory pruner used after deletions.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod prune;

pub use checksum::{FileIdentity, identity, unchanged};
pub use config::ConfigStore;
pub use constants::InstallPath;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::{NormalizedPath, validate_package_name};
pub use prune::remove_file_and_prune;

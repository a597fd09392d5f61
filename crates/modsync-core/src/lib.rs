//! Core engine for modsync
//!
//! Keeps the files of installed packages in step with newly fetched
//! versions without clobbering local edits. Each package has a baseline
//! recording the size and checksum of every file it installed; updates and
//! removals compare the disk against it to decide what is safe to touch.

pub mod baseline;
pub mod config;
pub mod error;
pub mod fetch;
pub mod package;
pub mod reconcile;
pub mod resolver;
pub mod sync;

pub use baseline::{Baseline, BaselineStore, FileRecord};
pub use config::{InstallContext, Settings};
pub use error::{Error, Result};
pub use fetch::{DirectoryFetcher, Fetcher};
pub use package::{DEFAULT_PACKAGE_TYPE, Package};
pub use reconcile::{Action, LocalChanges, local_change, reconcile};
pub use resolver::{Change, ChangeKind, ChannelPrompt, PromptIo, ResolverState};
pub use sync::{Operation, StatusKind, StatusReport, SyncEngine, SyncReport, Warning};

//! Package file synchronization
//!
//! The [`SyncEngine`] drives the three package operations:
//!
//! - **install**: copy every fetched file into the install root and record
//!   it in a fresh baseline
//! - **update**: reconcile the fetched tree with the disk and the old
//!   baseline, protecting local edits
//! - **remove**: delete recorded files that are still unchanged, then the
//!   baseline itself
//!
//! A read-only `status` check reports local edits without acting on them.

mod engine;
mod report;
mod staging;
mod status;

pub use engine::SyncEngine;
pub use report::{Operation, SyncReport, Warning};
pub use staging::{IncomingFile, IncomingTree, Staging};
pub use status::{StatusKind, StatusReport};

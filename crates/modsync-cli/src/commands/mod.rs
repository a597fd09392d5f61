//! Command implementations for modsync-cli

pub mod status;
pub mod sync;

pub use status::run_status;
pub use sync::{run_install, run_remove, run_update};

//! Shared test fixtures for the modsync workspace.
//!
//! Dev-dependency only. Fixtures deal in plain paths so they can be used
//! from any crate without pulling in the engine.
//!
//! # Modules
//!
//! - [`root`]: [`TestRoot`], a temporary install root with assertions
//! - [`source`]: [`PackageSource`], a package checkout to fetch from

pub mod root;
pub mod source;

pub use root::TestRoot;
pub use source::PackageSource;

//! powermap-core
//!
//! Core library for the power map data build.
//!
//! This crate extracts the embedded data literals from the monolithic source
//! document, checks the roster against the department roles, reconciles
//! constituency demographics with the roster, and assembles the JSON the
//! front-end consumes.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends.

pub mod demographics;
pub mod extract;
pub mod integrity;
pub mod model;
pub mod project;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

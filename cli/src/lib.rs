//! Support library for the `optable` and `optable-demo` binaries.
//!
//! - [`config`]: YAML/JSON option table files ([`config::TableConfig`]).
//! - [`report`]: owned, serializable parse reports and output formats.
//! - [`logging`]: tracing subscriber setup.
//!
//! Parsing itself lives in [`optable_core`]; this crate only adapts table
//! files to it and presents the results.

pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use error::{CliError, Result};

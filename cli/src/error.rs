//! Error types for the command-line tools.
//!
//! Covers reading and decoding table files, selecting commands, and table
//! validation failures.

use optable_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading or using a table configuration.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table file extension is neither YAML nor JSON.
    #[error("unsupported table format: {0}")]
    UnsupportedFormat(String),

    /// The table file declares no commands.
    #[error("table defines no commands")]
    NoCommands,

    /// The requested command is not declared in the table file.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command's option table failed validation.
    #[error("invalid table for '{command}': {source}")]
    InvalidTable {
        command: String,
        #[source]
        source: ValidationError,
    },

    /// The command list itself failed validation.
    #[error("invalid command list: {0}")]
    InvalidCommands(#[source] ValidationError),
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;

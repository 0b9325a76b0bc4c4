//! Option table and command table validation.
//!
//! The parser trusts its table: duplicate names resolve to the first entry
//! and unnamed descriptors are simply unreachable. These checks catch such
//! declaration mistakes up front, for use in tests or when loading tables
//! from configuration.
//!
//! # Examples
//!
//! ```
//! use optable_core::*;
//!
//! let table = [
//!     OptionSpec::flag(Some('v'), Some("verbose")),
//!     OptionSpec::string(Some('o'), Some("output")),
//! ];
//! assert!(validate_table(&table).is_empty());
//!
//! // Invalid: long name written with its dashes
//! let bad = [OptionSpec::flag(None, Some("--verbose"))];
//! assert!(!validate_table(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::OptionSpec;

/// Table validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A descriptor has neither short nor long form.
    #[error("option must define short or long form")]
    MissingOptionName,
    /// Short key that the parser could never match as a key (`-`, `=`,
    /// whitespace or control characters).
    #[error("invalid short option: {0:?}")]
    InvalidShortOption(char),
    /// Long name that is empty, starts with `-`, or contains `=` or
    /// whitespace.
    #[error("invalid long option: {0:?}")]
    InvalidLongOption(String),
    /// Two descriptors share a short key.
    #[error("duplicate short option: -{0}")]
    DuplicateShortOption(char),
    /// Two descriptors share a long name.
    #[error("duplicate long option: --{0}")]
    DuplicateLongOption(String),
    /// A command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Two commands share a name.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
}

/// Validates an option table.
///
/// Stops at the first problem found, so the result holds at most one error.
///
/// # Examples
///
/// ```
/// use optable_core::*;
///
/// let table = [
///     OptionSpec::flag(Some('f'), Some("flag")),
///     OptionSpec::string(Some('f'), Some("file")),
/// ];
/// assert_eq!(
///     validate_table(&table),
///     vec![ValidationError::DuplicateShortOption('f')]
/// );
/// ```
pub fn validate_table(table: &[OptionSpec<'_>]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_short = HashSet::new();
    let mut seen_long = HashSet::new();

    for spec in table {
        if spec.short.is_none() && spec.long.is_none() {
            errors.push(ValidationError::MissingOptionName);
            return errors;
        }

        if let Some(short) = spec.short {
            if short == '-' || short == '=' || short.is_whitespace() || short.is_control() {
                errors.push(ValidationError::InvalidShortOption(short));
                return errors;
            }
            if !seen_short.insert(short) {
                errors.push(ValidationError::DuplicateShortOption(short));
                return errors;
            }
        }

        if let Some(long) = spec.long {
            if long.is_empty()
                || long.starts_with('-')
                || long.contains('=')
                || long.contains(char::is_whitespace)
            {
                errors.push(ValidationError::InvalidLongOption(long.to_string()));
                return errors;
            }
            if !seen_long.insert(long) {
                errors.push(ValidationError::DuplicateLongOption(long.to_string()));
                return errors;
            }
        }
    }

    errors
}

/// Validates command names (non-empty and unique).
///
/// # Examples
///
/// ```
/// use optable_core::*;
///
/// assert!(validate_command_names(["foo", "help"]).is_empty());
/// assert_eq!(
///     validate_command_names(["foo", "foo"]),
///     vec![ValidationError::DuplicateCommand("foo".to_string())]
/// );
/// ```
pub fn validate_command_names<'n>(
    names: impl IntoIterator<Item = &'n str>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for name in names {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyCommandName);
            return errors;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateCommand(name.to_string()));
            return errors;
        }
    }

    errors
}

//! Allocation-free command-line option parsing.
//!
//! This crate parses an argument vector against a caller-owned option table
//! in a single pass:
//!
//! - [`OptionSpec`]: a recognized option with short key and/or long name, an
//!   [`OptionKind`] (flag, string or integer), help text, and the result of
//!   the last parse.
//! - [`parse_args`] / [`parse_tokens`]: classify tokens as long options,
//!   short options or positionals, resolve option values in place and return
//!   the positionals in a fixed-capacity [`Positionals`] list.
//! - [`find_short`] / [`find_long`]: option table lookup.
//! - [`Command`] / [`dispatch`]: select a command by `argv[1]` and run its
//!   [`Handler`].
//! - [`write_usage`], [`write_commands`], [`write_options`]: help text.
//! - [`validate_table`]: catch declaration mistakes such as duplicate names.
//!
//! The parse path never allocates: string values and positionals borrow
//! from the argument vector, and the table is a plain mutable slice.
//!
//! # Example
//!
//! ```
//! use optable_core::*;
//!
//! let argv = ["prog", "foo", "--name", "Alice", "-c3", "input.txt"];
//! let mut table = [
//!     OptionSpec::flag(Some('v'), Some("verbose")).with_help("Be verbose"),
//!     OptionSpec::string(Some('n'), Some("name")).with_help("Who to greet"),
//!     OptionSpec::integer(Some('c'), Some("count")).with_help("Repetitions"),
//! ];
//! assert!(validate_table(&table).is_empty());
//!
//! let positionals = parse_args(&argv, &mut table).unwrap();
//! assert!(!table[0].is_provided());
//! assert_eq!(table[1].string_value(), Some("Alice"));
//! assert_eq!(table[2].integer_value(), Some(3));
//! assert_eq!(positionals.as_slice(), ["input.txt"]);
//!
//! let err = parse_args(&["prog", "foo", "--bogus"], &mut table).unwrap_err();
//! assert_eq!(err.kind(), ParseErrorKind::UnknownOption);
//! ```

mod dispatch;
mod help;
mod parse;
mod resolve;
mod types;
mod validate;

pub use dispatch::{Command, CommandError, DispatchError, Handler, dispatch, find_command};
pub use help::{write_commands, write_options, write_usage};
pub use parse::{
    ParseError, ParseErrorKind, ParseResult, Positionals, is_integer_literal, parse_args,
    parse_args_with_capacity, parse_integer, parse_tokens, parse_tokens_with_capacity,
    reset_table,
};
pub use resolve::{
    find_long, find_long_mut, find_short, find_short_mut, position_long, position_short,
};
pub use types::*;
pub use validate::{ValidationError, validate_command_names, validate_table};

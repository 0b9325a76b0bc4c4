//! Single-pass argument parsing against a caller-owned option table.
//!
//! The parser walks the tokens once, left to right, with one token of
//! lookahead. Each token is classified as a long option (`--name`,
//! `--name=value`), a short option (`-n`, `-nvalue`) or a positional
//! argument. Option values are resolved in one of three ways:
//!
//! - inline after `=` on a long option,
//! - attached after the key of a short option,
//! - taken from the following token (lookahead consumption).
//!
//! Results are written into the table in place; string values borrow from
//! the token slice, so the table cannot outlive the arguments. Positional
//! arguments are collected into a fixed-capacity [`Positionals`] list.
//!
//! The first malformed token aborts the parse. On failure the table is reset
//! so no partially applied state is observable.
//!
//! # Example
//!
//! ```
//! use optable_core::{OptionSpec, parse_args};
//!
//! let argv = ["prog", "foo", "-f", "--string=hi", "-n", "-7", "pos1", "pos2"];
//! let mut table = [
//!     OptionSpec::flag(Some('f'), Some("flag")),
//!     OptionSpec::string(Some('s'), Some("string")),
//!     OptionSpec::integer(Some('n'), Some("number")),
//! ];
//!
//! let positionals = parse_args(&argv, &mut table).unwrap();
//! assert!(table[0].is_provided());
//! assert_eq!(table[1].string_value(), Some("hi"));
//! assert_eq!(table[2].integer_value(), Some(-7));
//! assert_eq!(positionals.as_slice(), ["pos1", "pos2"]);
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolve::{position_long, position_short};
use crate::{MAX_POSITIONALS, OptionKind, OptionSpec, OptionValue};

/// Status of a failed parse, without the offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// A token named an option absent from the table.
    UnknownOption,
    /// A value-taking option had no value available.
    MissingValue,
    /// An integer option's value was not a valid integer literal.
    InvalidValue,
}

/// Parse failure, borrowing the offending token from the arguments.
///
/// `option` is the option as written, without any value (`--count` for
/// `--count=abc`, `-c` for `-cabc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError<'a> {
    /// The token names an option absent from the table.
    #[error("unknown option: {option}")]
    UnknownOption { option: &'a str },
    /// No inline, attached or next-token value could be resolved.
    #[error("missing value for option: {option}")]
    MissingValue { option: &'a str },
    /// The value does not match `[+-]?[0-9]+` or does not fit in an `i64`.
    #[error("invalid value for option {option}: {value:?}")]
    InvalidValue { option: &'a str, value: &'a str },
}

impl<'a> ParseError<'a> {
    /// The status code of this error.
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::UnknownOption { .. } => ParseErrorKind::UnknownOption,
            ParseError::MissingValue { .. } => ParseErrorKind::MissingValue,
            ParseError::InvalidValue { .. } => ParseErrorKind::InvalidValue,
        }
    }

    /// The option token that caused the failure.
    pub const fn option(&self) -> &'a str {
        match *self {
            ParseError::UnknownOption { option }
            | ParseError::MissingValue { option }
            | ParseError::InvalidValue { option, .. } => option,
        }
    }
}

/// Positional arguments collected by a successful parse.
///
/// Holds at most `N` borrowed tokens in input order. Tokens beyond capacity
/// are dropped without error; [`dropped`](Positionals::dropped) counts them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positionals<'a, const N: usize = MAX_POSITIONALS> {
    items: heapless::Vec<&'a str, N>,
    dropped: usize,
}

impl<'a, const N: usize> Positionals<'a, N> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            items: heapless::Vec::new(),
            dropped: 0,
        }
    }

    /// Maximum number of positionals kept.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of positionals that did not fit.
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// The collected positionals.
    pub fn as_slice(&self) -> &[&'a str] {
        &self.items
    }

    fn push(&mut self, token: &'a str) {
        if self.items.push(token).is_err() {
            self.dropped += 1;
        }
    }
}

impl<'a, const N: usize> Deref for Positionals<'a, N> {
    type Target = [&'a str];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'p, 'a, const N: usize> IntoIterator for &'p Positionals<'a, N> {
    type Item = &'p &'a str;
    type IntoIter = std::slice::Iter<'p, &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Outcome of a parse call.
pub type ParseResult<'a, const N: usize = MAX_POSITIONALS> =
    Result<Positionals<'a, N>, ParseError<'a>>;

/// Parses a full process argument vector.
///
/// The program name (index 0) and command name (index 1) are skipped;
/// parsing begins at the third token. Shorter vectors parse as empty.
pub fn parse_args<'a, S: AsRef<str>>(
    argv: &'a [S],
    table: &mut [OptionSpec<'a>],
) -> ParseResult<'a> {
    parse_args_with_capacity::<MAX_POSITIONALS, S>(argv, table)
}

/// [`parse_args`] with a caller-chosen positional capacity.
pub fn parse_args_with_capacity<'a, const N: usize, S: AsRef<str>>(
    argv: &'a [S],
    table: &mut [OptionSpec<'a>],
) -> ParseResult<'a, N> {
    parse_tokens_with_capacity::<N, S>(argv.get(2..).unwrap_or_default(), table)
}

/// Parses tokens that already exclude the program and command names.
///
/// # Examples
///
/// ```
/// use optable_core::{OptionSpec, ParseErrorKind, parse_tokens};
///
/// let mut table = [OptionSpec::integer(Some('c'), Some("count"))];
///
/// let positionals = parse_tokens(&["-c42", "rest"], &mut table).unwrap();
/// assert_eq!(table[0].integer_value(), Some(42));
/// assert_eq!(positionals.as_slice(), ["rest"]);
///
/// let err = parse_tokens(&["--count=abc"], &mut table).unwrap_err();
/// assert_eq!(err.kind(), ParseErrorKind::InvalidValue);
/// assert!(!table[0].is_provided());
/// ```
pub fn parse_tokens<'a, S: AsRef<str>>(
    tokens: &'a [S],
    table: &mut [OptionSpec<'a>],
) -> ParseResult<'a> {
    parse_tokens_with_capacity::<MAX_POSITIONALS, S>(tokens, table)
}

/// [`parse_tokens`] with a caller-chosen positional capacity.
pub fn parse_tokens_with_capacity<'a, const N: usize, S: AsRef<str>>(
    tokens: &'a [S],
    table: &mut [OptionSpec<'a>],
) -> ParseResult<'a, N> {
    reset_table(table);
    let result = scan(tokens, table);
    if result.is_err() {
        reset_table(table);
    }
    result
}

/// Clears `provided` and any resolved value on every descriptor.
pub fn reset_table(table: &mut [OptionSpec<'_>]) {
    for spec in table.iter_mut() {
        spec.reset();
    }
}

/// Checks the integer literal grammar `[+-]?[0-9]+`.
///
/// # Examples
///
/// ```
/// use optable_core::is_integer_literal;
///
/// assert!(is_integer_literal("-7"));
/// assert!(is_integer_literal("+007"));
/// assert!(!is_integer_literal("-"));
/// assert!(!is_integer_literal("4x"));
/// assert!(!is_integer_literal(""));
/// ```
pub fn is_integer_literal(literal: &str) -> bool {
    let digits = literal.strip_prefix(['+', '-']).unwrap_or(literal);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Converts a literal accepted by [`is_integer_literal`] to an `i64`.
///
/// Returns `None` for malformed literals and for values out of range.
pub fn parse_integer(literal: &str) -> Option<i64> {
    if !is_integer_literal(literal) {
        return None;
    }
    literal.parse().ok()
}

enum Token<'a> {
    Long {
        option: &'a str,
        name: &'a str,
        inline: Option<&'a str>,
    },
    Short {
        option: &'a str,
        key: char,
        attached: &'a str,
    },
    Positional,
}

fn classify(token: &str) -> Token<'_> {
    if let Some(body) = token.strip_prefix("--") {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        return Token::Long {
            option: &token[..2 + name.len()],
            name,
            inline,
        };
    }

    // A bare "-" has no key and stays positional.
    if let Some(key) = token.strip_prefix('-').and_then(|body| body.chars().next()) {
        let split = 1 + key.len_utf8();
        return Token::Short {
            option: &token[..split],
            key,
            attached: &token[split..],
        };
    }

    Token::Positional
}

fn scan<'a, const N: usize, S: AsRef<str>>(
    tokens: &'a [S],
    table: &mut [OptionSpec<'a>],
) -> ParseResult<'a, N> {
    let mut positionals = Positionals::new();
    let mut index = 0;

    while let Some(token) = tokens.get(index) {
        let token: &'a str = token.as_ref();
        index += 1;

        let (slot, option, value) = match classify(token) {
            Token::Positional => {
                positionals.push(token);
                continue;
            }
            Token::Long {
                option,
                name,
                inline,
            } => {
                let slot =
                    position_long(table, name).ok_or(ParseError::UnknownOption { option })?;
                let value = match inline {
                    Some(value) => Some(value),
                    None => lookahead(tokens, &mut index, table[slot].kind, option)?,
                };
                (slot, option, value)
            }
            Token::Short {
                option,
                key,
                attached,
            } => {
                let slot =
                    position_short(table, key).ok_or(ParseError::UnknownOption { option })?;
                let kind = table[slot].kind;
                // Flags ignore trailing characters; clustering is not supported.
                let value = if !kind.takes_value() {
                    None
                } else if !attached.is_empty() {
                    Some(attached)
                } else {
                    lookahead(tokens, &mut index, kind, option)?
                };
                (slot, option, value)
            }
        };

        let value = materialize(table[slot].kind, option, value)?;
        table[slot].mark_provided(value);
    }

    Ok(positionals)
}

/// Resolves a value from the next token, advancing `index` past it.
fn lookahead<'a, S: AsRef<str>>(
    tokens: &'a [S],
    index: &mut usize,
    kind: OptionKind,
    option: &'a str,
) -> Result<Option<&'a str>, ParseError<'a>> {
    if !kind.takes_value() {
        return Ok(None);
    }

    match tokens.get(*index).map(|next| next.as_ref()) {
        Some(next) if accepts_lookahead(kind, next) => {
            *index += 1;
            Ok(Some(next))
        }
        _ => Err(ParseError::MissingValue { option }),
    }
}

/// Hyphen-led tokens look like options and are refused, except that an
/// integer option takes a negative literal such as `-7`.
fn accepts_lookahead(kind: OptionKind, next: &str) -> bool {
    !next.starts_with('-') || (kind == OptionKind::Integer && is_integer_literal(next))
}

fn materialize<'a>(
    kind: OptionKind,
    option: &'a str,
    value: Option<&'a str>,
) -> Result<Option<OptionValue<'a>>, ParseError<'a>> {
    match (kind, value) {
        (OptionKind::Flag, _) => Ok(None),
        (OptionKind::String, Some(value)) => Ok(Some(OptionValue::Str(value))),
        (OptionKind::Integer, Some(value)) => parse_integer(value)
            .map(|n| Some(OptionValue::Int(n)))
            .ok_or(ParseError::InvalidValue { option, value }),
        (_, None) => Err(ParseError::MissingValue { option }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_start<'a>() -> [OptionSpec<'a>; 3] {
        [
            OptionSpec::flag(Some('f'), Some("flag")),
            OptionSpec::string(Some('s'), Some("string")),
            OptionSpec::integer(Some('n'), Some("number")),
        ]
    }

    #[test]
    fn test_round_trip_quick_start() {
        let argv = ["prog", "foo", "-f", "--string=hi", "-n", "-7", "pos1", "pos2"];
        let mut table = quick_start();

        let positionals = parse_args(&argv, &mut table).unwrap();

        assert!(table.iter().all(|o| o.is_provided()));
        assert_eq!(table[1].string_value(), Some("hi"));
        assert_eq!(table[2].integer_value(), Some(-7));
        assert_eq!(positionals.as_slice(), ["pos1", "pos2"]);
        assert_eq!(positionals.dropped(), 0);
    }

    #[test]
    fn test_flag_forms_consume_nothing() {
        for tokens in [["--flag", "next"], ["-f", "next"]] {
            let mut table = quick_start();
            let positionals = parse_tokens(&tokens, &mut table).unwrap();
            assert!(table[0].is_provided());
            assert_eq!(table[0].value(), None);
            assert_eq!(positionals.as_slice(), ["next"]);
        }
    }

    #[test]
    fn test_string_value_forms() {
        let cases: [&[&str]; 4] = [
            &["--string=Alice"],
            &["--string", "Alice"],
            &["-s", "Alice"],
            &["-sAlice"],
        ];
        for tokens in cases {
            let mut table = quick_start();
            let positionals = parse_tokens(tokens, &mut table).unwrap();
            assert_eq!(table[1].string_value(), Some("Alice"), "tokens: {tokens:?}");
            assert!(positionals.is_empty());
        }
    }

    #[test]
    fn test_integer_value_forms() {
        let cases: [&[&str]; 5] = [
            &["--number=42"],
            &["--number", "42"],
            &["-n", "42"],
            &["-n42"],
            &["-n", "+42"],
        ];
        for tokens in cases {
            let mut table = quick_start();
            parse_tokens(tokens, &mut table).unwrap();
            assert_eq!(table[2].integer_value(), Some(42), "tokens: {tokens:?}");
        }
    }

    #[test]
    fn test_invalid_integers() {
        for tokens in [["--number=abc"], ["--number="], ["-n4x"], ["-n+"]] {
            let mut table = quick_start();
            let err = parse_tokens(&tokens, &mut table).unwrap_err();
            assert_eq!(err.kind(), ParseErrorKind::InvalidValue, "tokens: {tokens:?}");
        }

        let mut table = quick_start();
        let err = parse_tokens(&["--number=99999999999999999999"], &mut table).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidValue {
                option: "--number",
                value: "99999999999999999999"
            }
        );
    }

    #[test]
    fn test_empty_inline_string_is_a_value() {
        let mut table = quick_start();
        parse_tokens(&["--string="], &mut table).unwrap();
        assert_eq!(table[1].string_value(), Some(""));
    }

    #[test]
    fn test_inline_value_on_flag_is_ignored() {
        let mut table = quick_start();
        let positionals = parse_tokens(&["--flag=yes", "x"], &mut table).unwrap();
        assert!(table[0].is_provided());
        assert_eq!(table[0].value(), None);
        assert_eq!(positionals.as_slice(), ["x"]);
    }

    #[test]
    fn test_trailing_chars_on_short_flag_are_ignored() {
        let mut table = quick_start();
        parse_tokens(&["-fsn"], &mut table).unwrap();
        assert!(table[0].is_provided());
        assert!(!table[1].is_provided());
        assert!(!table[2].is_provided());
    }

    #[test]
    fn test_lookahead_refuses_hyphen_tokens() {
        let mut table = quick_start();
        let err = parse_tokens(&["--string", "--flag"], &mut table).unwrap_err();
        assert_eq!(err, ParseError::MissingValue { option: "--string" });

        let err = parse_tokens(&["-s", "-"], &mut table).unwrap_err();
        assert_eq!(err, ParseError::MissingValue { option: "-s" });

        let err = parse_tokens(&["-s", "-7"], &mut table).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MissingValue);

        let err = parse_tokens(&["-n", "-x"], &mut table).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MissingValue);
    }

    #[test]
    fn test_missing_value_at_end() {
        let mut table = quick_start();
        let err = parse_tokens(&["pos", "--number"], &mut table).unwrap_err();
        assert_eq!(err, ParseError::MissingValue { option: "--number" });
    }

    #[test]
    fn test_unknown_options_abort() {
        let mut table = quick_start();
        let err = parse_tokens(&["--bogus=1", "--number=oops"], &mut table).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption { option: "--bogus" });

        let err = parse_tokens(&["-z", "-n", "x"], &mut table).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption { option: "-z" });

        let err = parse_tokens(&["--"], &mut table).unwrap_err();
        assert_eq!(err, ParseError::UnknownOption { option: "--" });
    }

    #[test]
    fn test_failure_leaves_table_reset() {
        let mut table = quick_start();
        let err = parse_tokens(&["-f", "-s", "kept", "--bogus"], &mut table).unwrap_err();
        assert_eq!(err.option(), "--bogus");
        assert!(table.iter().all(|o| !o.is_provided()));
        assert_eq!(table[1].string_value(), None);
    }

    #[test]
    fn test_bare_hyphen_is_positional() {
        let mut table = quick_start();
        let positionals = parse_tokens(&["-", "a", "-f", "b"], &mut table).unwrap();
        assert_eq!(positionals.as_slice(), ["-", "a", "b"]);
    }

    #[test]
    fn test_positionals_beyond_capacity_are_dropped() {
        let mut table = quick_start();
        let positionals =
            parse_tokens_with_capacity::<2, _>(&["a", "-f", "b", "c", "d"], &mut table).unwrap();
        assert_eq!(positionals.as_slice(), ["a", "b"]);
        assert_eq!(positionals.dropped(), 2);
        assert_eq!(positionals.capacity(), 2);
        assert!(table[0].is_provided());
    }

    #[test]
    fn test_parse_resets_previous_state() {
        let first = ["-f", "-s", "one", "-n", "1"];
        let second = ["--number", "2"];
        let mut table = quick_start();

        parse_tokens(&first, &mut table).unwrap();
        assert!(table[0].is_provided());

        parse_tokens(&second, &mut table).unwrap();
        assert!(!table[0].is_provided());
        assert_eq!(table[1].string_value(), None);
        assert_eq!(table[2].integer_value(), Some(2));
    }

    #[test]
    fn test_short_argv_parses_empty() {
        let mut table = quick_start();
        assert!(parse_args(&["prog"], &mut table).unwrap().is_empty());
        assert!(parse_args::<&str>(&[], &mut table).unwrap().is_empty());
    }

    #[test]
    fn test_empty_table_accepts_only_positionals() {
        let mut table: [OptionSpec<'_>; 0] = [];
        let positionals = parse_tokens(&["a", "b"], &mut table).unwrap();
        assert_eq!(positionals.len(), 2);
        assert!(parse_tokens(&["-a"], &mut table).is_err());
    }

    #[test]
    fn test_owned_arguments() {
        let argv: Vec<String> = ["prog", "cmd", "-sAlice", "rest"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut table = quick_start();
        let positionals = parse_args(&argv, &mut table).unwrap();
        assert_eq!(table[1].string_value(), Some("Alice"));
        assert_eq!(positionals.iter().copied().collect::<Vec<_>>(), ["rest"]);
    }

    #[test]
    fn test_multibyte_short_key() {
        let mut table = [OptionSpec::string(Some('é'), None)];
        parse_tokens(&["-évalue"], &mut table).unwrap();
        assert_eq!(table[0].string_value(), Some("value"));
    }
}

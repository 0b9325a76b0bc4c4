//! Option descriptor types.
//!
//! An option table is a plain mutable slice of [`OptionSpec`] values owned by
//! the caller (usually a stack array). Each descriptor carries its static
//! declaration (short and long names, kind, help text) together with the
//! transient result of the most recent parse call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default capacity of the positional argument list.
pub const MAX_POSITIONALS: usize = 64;

/// Kind of value an option accepts.
///
/// The kind is fixed for the lifetime of a descriptor and decides how the
/// parser resolves and materializes the option's value.
///
/// # Examples
///
/// ```
/// use optable_core::OptionKind;
///
/// assert!(!OptionKind::Flag.takes_value());
/// assert!(OptionKind::Integer.takes_value());
/// assert_eq!(OptionKind::String.value_placeholder(), Some("<STRING>"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Presence-only option (the default).
    #[default]
    Flag,
    /// Free-form string value, borrowed from the argument vector.
    String,
    /// Signed base-10 integer value.
    Integer,
}

impl OptionKind {
    /// Returns `true` for kinds that resolve a value.
    pub const fn takes_value(self) -> bool {
        !matches!(self, OptionKind::Flag)
    }

    /// Placeholder shown after the option name in help text.
    pub const fn value_placeholder(self) -> Option<&'static str> {
        match self {
            OptionKind::Flag => None,
            OptionKind::String => Some("<STRING>"),
            OptionKind::Integer => Some("<INT>"),
        }
    }

    /// Lowercase name of the kind, matching its serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            OptionKind::Flag => "flag",
            OptionKind::String => "string",
            OptionKind::Integer => "integer",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value resolved for a matched, non-flag option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue<'a> {
    /// String value aliasing the original token.
    Str(&'a str),
    /// Integer value.
    Int(i64),
}

/// Descriptor for one recognized option.
///
/// Use [`flag`](OptionSpec::flag), [`string`](OptionSpec::string) and
/// [`integer`](OptionSpec::integer) to declare descriptors, then chain
/// [`with_help`](OptionSpec::with_help). Long names are given without the
/// leading `--`.
///
/// After a parse call, [`is_provided`](OptionSpec::is_provided),
/// [`string_value`](OptionSpec::string_value) and
/// [`integer_value`](OptionSpec::integer_value) report what the parser found.
///
/// # Examples
///
/// ```
/// use optable_core::{OptionKind, OptionSpec};
///
/// let verbose = OptionSpec::flag(Some('v'), Some("verbose")).with_help("Be verbose");
/// assert_eq!(verbose.kind, OptionKind::Flag);
/// assert_eq!(verbose.to_string(), "--verbose");
/// assert!(!verbose.is_provided());
///
/// let count = OptionSpec::integer(Some('c'), None);
/// assert_eq!(count.to_string(), "-c");
/// assert_eq!(count.integer_value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec<'a> {
    /// Short form key (e.g. `'f'` for `-f`).
    pub short: Option<char>,
    /// Long form name without dashes (e.g. `"flag"` for `--flag`).
    pub long: Option<&'a str>,
    /// Kind of value accepted.
    pub kind: OptionKind,
    /// Help description, never parsed.
    pub help: &'a str,
    provided: bool,
    value: Option<OptionValue<'a>>,
}

impl<'a> OptionSpec<'a> {
    /// Creates a descriptor of the given kind.
    pub const fn new(short: Option<char>, long: Option<&'a str>, kind: OptionKind) -> Self {
        Self {
            short,
            long,
            kind,
            help: "",
            provided: false,
            value: None,
        }
    }

    /// Creates a presence-only flag.
    pub const fn flag(short: Option<char>, long: Option<&'a str>) -> Self {
        Self::new(short, long, OptionKind::Flag)
    }

    /// Creates an option that takes a string value.
    pub const fn string(short: Option<char>, long: Option<&'a str>) -> Self {
        Self::new(short, long, OptionKind::String)
    }

    /// Creates an option that takes an integer value.
    pub const fn integer(short: Option<char>, long: Option<&'a str>) -> Self {
        Self::new(short, long, OptionKind::Integer)
    }

    /// Sets the help text.
    pub const fn with_help(mut self, help: &'a str) -> Self {
        self.help = help;
        self
    }

    /// Whether the option appeared in the last parsed argument vector.
    pub const fn is_provided(&self) -> bool {
        self.provided
    }

    /// Resolved value, if the option was provided and takes one.
    pub const fn value(&self) -> Option<OptionValue<'a>> {
        if self.provided { self.value } else { None }
    }

    /// String value for a provided [`OptionKind::String`] option.
    pub fn string_value(&self) -> Option<&'a str> {
        match self.value() {
            Some(OptionValue::Str(value)) if self.kind == OptionKind::String => Some(value),
            _ => None,
        }
    }

    /// Integer value for a provided [`OptionKind::Integer`] option.
    pub fn integer_value(&self) -> Option<i64> {
        match self.value() {
            Some(OptionValue::Int(value)) if self.kind == OptionKind::Integer => Some(value),
            _ => None,
        }
    }

    /// Checks the short form.
    pub fn matches_short(&self, key: char) -> bool {
        self.short == Some(key)
    }

    /// Checks the long form (exact, case-sensitive).
    pub fn matches_long(&self, name: &str) -> bool {
        self.long == Some(name)
    }

    pub(crate) fn reset(&mut self) {
        self.provided = false;
        self.value = None;
    }

    pub(crate) fn mark_provided(&mut self, value: Option<OptionValue<'a>>) {
        self.provided = true;
        self.value = value;
    }
}

/// Writes the canonical name: `--long` when present, `-s` otherwise.
impl fmt::Display for OptionSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.long, self.short) {
            (Some(long), _) => write!(f, "--{long}"),
            (None, Some(short)) => write!(f, "-{short}"),
            (None, None) => f.write_str("<unnamed>"),
        }
    }
}

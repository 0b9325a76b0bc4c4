//! Help text rendering.
//!
//! Writes into any [`fmt::Write`] sink, so a caller can render into a
//! `String` or a fixed buffer without the renderer allocating.

use std::fmt::{self, Write};

use crate::{Command, OptionSpec};

/// Writes `Usage: <program> <command> [options]`.
pub fn write_usage<W: Write>(out: &mut W, program: &str) -> fmt::Result {
    writeln!(out, "Usage: {program} <command> [options]")
}

/// Writes an aligned `Commands:` section.
///
/// # Examples
///
/// ```
/// use optable_core::{Command, CommandError, write_commands};
///
/// fn noop(_: &[&str]) -> Result<(), CommandError> { Ok(()) }
///
/// let commands = [
///     Command::new("foo", &noop).with_help("Example command"),
///     Command::new("help", &noop).with_help("Show this message"),
/// ];
/// let mut out = String::new();
/// write_commands(&mut out, &commands).unwrap();
/// assert_eq!(out, "Commands:\n  foo   Example command\n  help  Show this message\n");
/// ```
pub fn write_commands<W: Write>(out: &mut W, commands: &[Command<'_>]) -> fmt::Result {
    writeln!(out, "Commands:")?;
    let width = commands
        .iter()
        .map(|command| command.name.chars().count())
        .max()
        .unwrap_or(0);

    for command in commands {
        write!(out, "  {}", command.name)?;
        if !command.help.is_empty() {
            pad(out, width - command.name.chars().count() + 2)?;
            out.write_str(command.help)?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

/// Writes an aligned `Options:` section.
///
/// Each line shows the short and long forms and a value placeholder for
/// value-taking kinds, followed by the help text.
///
/// # Examples
///
/// ```
/// use optable_core::{OptionSpec, write_options};
///
/// let table = [
///     OptionSpec::flag(Some('f'), Some("flag")).with_help("Set a flag"),
///     OptionSpec::integer(None, Some("number")).with_help("A number"),
///     OptionSpec::string(Some('s'), None),
/// ];
/// let mut out = String::new();
/// write_options(&mut out, &table).unwrap();
/// assert_eq!(
///     out,
///     "Options:\n  -f, --flag            Set a flag\n      --number <INT>    A number\n  -s <STRING>\n"
/// );
/// ```
pub fn write_options<W: Write>(out: &mut W, table: &[OptionSpec<'_>]) -> fmt::Result {
    writeln!(out, "Options:")?;
    let width = table.iter().map(label_width).max().unwrap_or(0);

    for spec in table {
        out.write_str("  ")?;
        write_label(out, spec)?;
        if !spec.help.is_empty() {
            pad(out, width - label_width(spec) + 4)?;
            out.write_str(spec.help)?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

fn write_label<W: Write>(out: &mut W, spec: &OptionSpec<'_>) -> fmt::Result {
    match (spec.short, spec.long) {
        (Some(short), Some(long)) => write!(out, "-{short}, --{long}")?,
        (Some(short), None) => write!(out, "-{short}")?,
        (None, Some(long)) => write!(out, "    --{long}")?,
        (None, None) => {}
    }
    if let Some(placeholder) = spec.kind.value_placeholder() {
        write!(out, " {placeholder}")?;
    }
    Ok(())
}

fn label_width(spec: &OptionSpec<'_>) -> usize {
    let names = match (spec.short, spec.long) {
        (Some(_), Some(long)) => 6 + long.chars().count(),
        (Some(_), None) => 2,
        (None, Some(long)) => 6 + long.chars().count(),
        (None, None) => 0,
    };
    let placeholder = spec
        .kind
        .value_placeholder()
        .map_or(0, |placeholder| 1 + placeholder.len());
    names + placeholder
}

fn pad<W: Write>(out: &mut W, columns: usize) -> fmt::Result {
    for _ in 0..columns {
        out.write_char(' ')?;
    }
    Ok(())
}

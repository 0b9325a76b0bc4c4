//! Command lookup and dispatch.
//!
//! A command table is a slice of [`Command`] values pairing a name with a
//! [`Handler`]. [`dispatch`] selects the command named by `argv[1]` and runs
//! its handler with the full argument vector; handlers then parse their own
//! options with [`parse_args`](crate::parse_args), which skips the program
//! and command names.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//!
//! use optable_core::{Command, CommandError, dispatch, find_command};
//!
//! let calls = Cell::new(0);
//! let count = |_: &[&str]| -> Result<(), CommandError> {
//!     calls.set(calls.get() + 1);
//!     Ok(())
//! };
//! let commands = [Command::new("count", &count).with_help("Count invocations")];
//!
//! dispatch(&["prog", "count", "--ignored"], &commands).unwrap();
//! assert_eq!(calls.get(), 1);
//! assert!(find_command(&commands, "other").is_none());
//! assert!(dispatch(&["prog", "other"], &commands).is_err());
//! ```

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{ParseError, ParseErrorKind};

/// Failure reported by a command handler.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The handler's option parse failed.
    #[error("{message}")]
    Parse {
        kind: ParseErrorKind,
        message: String,
    },
    /// Writing command output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Any other handler failure.
    #[error("{0}")]
    Failed(String),
}

impl From<ParseError<'_>> for CommandError {
    fn from(err: ParseError<'_>) -> Self {
        Self::Parse {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Errors returned by [`dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The argument vector has no command name.
    #[error("no command given")]
    MissingCommand,
    /// No command in the table has the given name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// The selected handler failed.
    #[error("command '{name}' failed: {source}")]
    Command {
        name: String,
        #[source]
        source: CommandError,
    },
}

/// Behavior bound to a command name.
///
/// Implemented for any `Fn(&[&str]) -> Result<(), CommandError>`, so plain
/// functions and closures can be used directly.
pub trait Handler {
    /// Runs the command with the full argument vector (program name first).
    fn run(&self, argv: &[&str]) -> Result<(), CommandError>;
}

impl<F> Handler for F
where
    F: Fn(&[&str]) -> Result<(), CommandError>,
{
    fn run(&self, argv: &[&str]) -> Result<(), CommandError> {
        self(argv)
    }
}

/// A named command with its handler.
#[derive(Clone, Copy)]
pub struct Command<'c> {
    /// Name matched against `argv[1]`.
    pub name: &'c str,
    /// One-line description for help output.
    pub help: &'c str,
    /// Behavior run on dispatch.
    pub handler: &'c dyn Handler,
}

impl<'c> Command<'c> {
    /// Creates a command without help text.
    pub const fn new(name: &'c str, handler: &'c dyn Handler) -> Self {
        Self {
            name,
            help: "",
            handler,
        }
    }

    /// Sets the help text.
    pub const fn with_help(mut self, help: &'c str) -> Self {
        self.help = help;
        self
    }
}

impl fmt::Debug for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// Finds a command by exact name; the first match wins.
pub fn find_command<'t, 'c>(
    commands: &'t [Command<'c>],
    name: &str,
) -> Option<&'t Command<'c>> {
    commands.iter().find(|command| command.name == name)
}

/// Runs the handler of the command named by `argv[1]`.
///
/// # Errors
///
/// Returns [`DispatchError::MissingCommand`] when `argv` has fewer than two
/// elements, [`DispatchError::UnknownCommand`] when no command matches, and
/// [`DispatchError::Command`] when the handler fails.
pub fn dispatch(argv: &[&str], commands: &[Command<'_>]) -> Result<(), DispatchError> {
    let Some(&name) = argv.get(1) else {
        return Err(DispatchError::MissingCommand);
    };

    let command = find_command(commands, name)
        .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

    debug!(
        command = command.name,
        args = argv.len() - 2,
        "Dispatching command"
    );

    command
        .handler
        .run(argv)
        .map_err(|source| DispatchError::Command {
            name: command.name.to_string(),
            source,
        })
}

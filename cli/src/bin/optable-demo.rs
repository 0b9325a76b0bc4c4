//! Sample program built on the option table parser.
//!
//! ```text
//! optable-demo foo -f --string=hi -n -7 pos1 pos2
//! optable-demo help
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use optable_cli::logging::init_tracing;
use optable_core::{
    Command, CommandError, DispatchError, OptionSpec, ParseErrorKind, dispatch, parse_args,
    write_commands, write_options, write_usage,
};
use tracing::debug;

const PROGRAM: &str = "optable-demo";

const COMMANDS: [Command<'static>; 2] = [
    Command::new("foo", &cmd_foo)
        .with_help("Example command with various options and positionals"),
    Command::new("help", &cmd_help).with_help("Show this message"),
];

fn foo_options<'a>() -> [OptionSpec<'a>; 3] {
    [
        OptionSpec::flag(Some('f'), Some("flag")).with_help("Set the flag"),
        OptionSpec::string(Some('s'), Some("string"))
            .with_help("String value (default: \"default\")"),
        OptionSpec::integer(Some('n'), Some("number")).with_help("Number value"),
    ]
}

fn cmd_foo(argv: &[&str]) -> Result<(), CommandError> {
    let mut opts = foo_options();
    let positionals = parse_args(argv, &mut opts)?;
    debug!(positionals = positionals.len(), "Parsed foo options");

    let [flag, string, number] = &opts;
    let mut out = io::stdout().lock();

    writeln!(out, "Executing foo command")?;
    if flag.is_provided() {
        writeln!(out, "Flag is set!")?;
    }
    writeln!(out, "String value: {}", string.string_value().unwrap_or("default"))?;
    if let Some(value) = number.integer_value() {
        writeln!(out, "Number value: {value}")?;
    }

    if !positionals.is_empty() {
        writeln!(out, "Positional arguments:")?;
        for (index, arg) in (&positionals).into_iter().enumerate() {
            writeln!(out, "\t[{index}] {arg}")?;
        }
    }
    Ok(())
}

fn cmd_help(_: &[&str]) -> Result<(), CommandError> {
    io::stdout().lock().write_all(help_text().as_bytes())?;
    Ok(())
}

fn help_text() -> String {
    let mut out = String::new();
    let _ = write_usage(&mut out, PROGRAM);
    out.push('\n');
    let _ = write_commands(&mut out, &COMMANDS);
    out.push_str("\nfoo ");
    let _ = write_options(&mut out, &foo_options());
    out
}

fn parse_error_message(kind: ParseErrorKind) -> &'static str {
    match kind {
        ParseErrorKind::UnknownOption => "Error: Unknown option",
        ParseErrorKind::MissingValue => "Error: Missing option value",
        ParseErrorKind::InvalidValue => "Error: Invalid option value",
    }
}

fn main() -> ExitCode {
    init_tracing(false);

    // Non-UTF-8 bytes become U+FFFD instead of aborting.
    let args: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();

    match dispatch(&argv, &COMMANDS) {
        Ok(()) => ExitCode::SUCCESS,
        Err(DispatchError::MissingCommand) => {
            print!("{}", help_text());
            ExitCode::FAILURE
        }
        Err(DispatchError::UnknownCommand(name)) => {
            println!("Unknown command: {name}");
            print!("{}", help_text());
            ExitCode::FAILURE
        }
        Err(DispatchError::Command {
            source: CommandError::Parse { kind, message },
            ..
        }) => {
            debug!(%message, "Option parsing failed");
            println!("{}", parse_error_message(kind));
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

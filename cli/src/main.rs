use std::fmt::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use optable_cli::Result;
use optable_cli::config::TableConfig;
use optable_cli::logging::init_tracing;
use optable_cli::report::{OutputFormat, ParseReport, format_report};
use optable_core::{parse_tokens, write_options};
use tracing::{debug, info};

/// Exit status for an argument vector that failed to parse.
const PARSE_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "optable")]
#[command(about = "Inspect option tables and how argument vectors parse against them")]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments against a command's option table and print the result.
    Check(CheckArgs),
    /// Validate every option table in a table file.
    Validate(ValidateArgs),
    /// Print the commands and options declared in a table file.
    Describe(DescribeArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Table file (YAML or JSON).
    #[arg(long)]
    table: PathBuf,
    /// Command whose option table is used (default: the first one).
    #[arg(long)]
    command: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Arguments to parse, given after `--` (program and command name excluded).
    #[arg(last = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Table file (YAML or JSON).
    #[arg(long)]
    table: PathBuf,
}

#[derive(Debug, Args)]
struct DescribeArgs {
    /// Table file (YAML or JSON).
    #[arg(long)]
    table: PathBuf,
    /// Only describe this command.
    #[arg(long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Validate(args) => run_validate(args),
        Command::Describe(args) => run_describe(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_check(args: CheckArgs) -> Result<ExitCode> {
    let config = TableConfig::load(&args.table)?;
    let command = config.command(args.command.as_deref())?;

    let mut table = command.option_specs();
    let result = parse_tokens(&args.args, &mut table);
    let report = ParseReport::new(&command.name, &table, &result);

    debug!(
        command = %command.name,
        tokens = args.args.len(),
        status = ?report.status,
        "Parsed arguments"
    );

    let raw = format_report(&report, args.format)?;
    println!("{}", raw.trim_end());

    if report.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(PARSE_FAILURE))
    }
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode> {
    let config = TableConfig::load(&args.table)?;
    config.validate()?;

    info!(path = %args.table.display(), "Option tables are valid");
    println!(
        "Validated {} command(s) in '{}'.",
        config.commands.len(),
        args.table.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_describe(args: DescribeArgs) -> Result<ExitCode> {
    let config = TableConfig::load(&args.table)?;
    let commands = match args.command.as_deref() {
        Some(name) => vec![config.command(Some(name))?],
        None => config.commands.iter().collect(),
    };

    let mut out = String::new();
    for (index, command) in commands.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if command.help.is_empty() {
            let _ = writeln!(out, "{}", command.name);
        } else {
            let _ = writeln!(out, "{}  {}", command.name, command.help);
        }
        if !command.options.is_empty() {
            let _ = write_options(&mut out, &command.option_specs());
        }
    }

    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

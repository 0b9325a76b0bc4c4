//! Serializable parse reports and their output formats.
//!
//! A [`ParseReport`] is an owned snapshot of one parse call: the status, the
//! state of every option in table order, and the collected positionals.

use std::fmt::Write;

use optable_core::{OptionKind, OptionSpec, OptionValue, ParseErrorKind, ParseResult};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Overall status of a parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    Ok,
    UnknownOption,
    MissingValue,
    InvalidValue,
}

impl From<ParseErrorKind> for ParseStatus {
    fn from(kind: ParseErrorKind) -> Self {
        match kind {
            ParseErrorKind::UnknownOption => Self::UnknownOption,
            ParseErrorKind::MissingValue => Self::MissingValue,
            ParseErrorKind::InvalidValue => Self::InvalidValue,
        }
    }
}

/// Resolved value of one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Integer(i64),
    String(String),
}

/// State of one option after the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionReport {
    /// Canonical name (`--long`, or `-s` for short-only options).
    pub name: String,
    pub kind: OptionKind,
    pub provided: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ReportValue>,
}

impl From<&OptionSpec<'_>> for OptionReport {
    fn from(spec: &OptionSpec<'_>) -> Self {
        Self {
            name: spec.to_string(),
            kind: spec.kind,
            provided: spec.is_provided(),
            value: spec.value().map(|value| match value {
                OptionValue::Str(value) => ReportValue::String(value.to_string()),
                OptionValue::Int(value) => ReportValue::Integer(value),
            }),
        }
    }
}

/// Owned snapshot of one parse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Command whose table was used.
    pub command: String,
    pub status: ParseStatus,
    /// Error message when the parse failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Options in table order.
    pub options: Vec<OptionReport>,
    /// Positionals in input order.
    #[serde(default)]
    pub positionals: Vec<String>,
    /// Positionals dropped because the list was full.
    #[serde(default)]
    pub dropped_positionals: usize,
}

impl ParseReport {
    /// Builds a report from a parse result and the table it populated.
    pub fn new<const N: usize>(
        command: &str,
        table: &[OptionSpec<'_>],
        result: &ParseResult<'_, N>,
    ) -> Self {
        let options = table.iter().map(OptionReport::from).collect();
        match result {
            Ok(positionals) => Self {
                command: command.to_string(),
                status: ParseStatus::Ok,
                error: None,
                options,
                positionals: positionals.iter().map(|arg| arg.to_string()).collect(),
                dropped_positionals: positionals.dropped(),
            },
            Err(err) => Self {
                command: command.to_string(),
                status: err.kind().into(),
                error: Some(err.to_string()),
                options,
                positionals: Vec::new(),
                dropped_positionals: 0,
            },
        }
    }

    /// Whether the parse succeeded.
    pub fn is_ok(&self) -> bool {
        self.status == ParseStatus::Ok
    }
}

/// Formats a report in the requested output format.
pub fn format_report(report: &ParseReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Text => Ok(report_to_text(report)),
    }
}

fn report_to_text(report: &ParseReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Command: {}", report.command);
    match &report.error {
        Some(error) => {
            let _ = writeln!(out, "Status: error ({error})");
        }
        None => {
            let _ = writeln!(out, "Status: ok");
        }
    }

    if !report.options.is_empty() {
        out.push_str("Options:\n");
        for option in &report.options {
            let state = if option.provided { "set" } else { "unset" };
            let _ = write!(out, "  {:<20} {:<8} {state}", option.name, option.kind.as_str());
            match &option.value {
                Some(ReportValue::Integer(value)) => {
                    let _ = write!(out, " = {value}");
                }
                Some(ReportValue::String(value)) => {
                    let _ = write!(out, " = {value:?}");
                }
                None => {}
            }
            out.push('\n');
        }
    }

    if !report.positionals.is_empty() {
        out.push_str("Positional arguments:\n");
        for (index, arg) in report.positionals.iter().enumerate() {
            let _ = writeln!(out, "  [{index}] {arg}");
        }
    }
    if report.dropped_positionals > 0 {
        let _ = writeln!(
            out,
            "Dropped positional arguments: {}",
            report.dropped_positionals
        );
    }

    out
}

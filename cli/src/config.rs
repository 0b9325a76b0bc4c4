//! Option table configuration files.
//!
//! Declares commands and their option tables in YAML or JSON, so the
//! `optable` tool can parse argument vectors against tables that are not
//! compiled in.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! commands:
//!   - name: foo
//!     help: Example command with various options and positionals
//!     options:
//!       - { short: f, long: flag, kind: flag, help: Set a flag }
//!       - { short: s, long: string, kind: string }
//!       - { short: n, long: number, kind: integer }
//! ```

use std::io::BufReader;
use std::path::Path;

use optable_core::{OptionKind, OptionSpec, validate_command_names, validate_table};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

fn default_version() -> String {
    "1.0".to_string()
}

/// One option declaration.
///
/// # Examples
///
/// ```
/// # use optable_cli::config::OptionConfig;
/// use optable_core::OptionKind;
///
/// let option = OptionConfig {
///     short: Some('n'),
///     long: Some("number".into()),
///     kind: OptionKind::Integer,
///     help: "A number".into(),
/// };
/// let spec = option.to_spec();
/// assert_eq!(spec.long, Some("number"));
/// assert_eq!(spec.kind, OptionKind::Integer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Short key, without the dash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Long name, without the dashes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Value kind (`flag`, `string` or `integer`).
    #[serde(default)]
    pub kind: OptionKind,
    /// Help description.
    #[serde(default)]
    pub help: String,
}

impl OptionConfig {
    /// Builds a descriptor borrowing this declaration's names.
    pub fn to_spec(&self) -> OptionSpec<'_> {
        OptionSpec::new(self.short, self.long.as_deref(), self.kind).with_help(&self.help)
    }
}

/// One command and its option table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Command name matched against `argv[1]`.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub help: String,
    /// Options in table order.
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

impl CommandConfig {
    /// Builds the option table for this command.
    pub fn option_specs(&self) -> Vec<OptionSpec<'_>> {
        self.options.iter().map(OptionConfig::to_spec).collect()
    }
}

/// Top-level table configuration.
///
/// # Examples
///
/// ```
/// use optable_cli::config::TableConfig;
///
/// let config = TableConfig::from_yaml_str(
///     "commands:\n  - name: foo\n    options:\n      - { short: f, long: flag }\n",
/// )
/// .unwrap();
/// assert_eq!(config.version, "1.0");
/// assert_eq!(config.command(None).unwrap().name, "foo");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Configuration format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Declared commands.
    pub commands: Vec<CommandConfig>,
}

impl TableConfig {
    /// Loads a table file, choosing the decoder by extension
    /// (`.yaml`/`.yml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CliError::IoError) if the file cannot be read,
    /// [`UnsupportedFormat`](CliError::UnsupportedFormat) for other
    /// extensions, or a decoding error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_reader(reader)?,
            "json" => serde_json::from_reader(reader)?,
            _ => return Err(CliError::UnsupportedFormat(path.display().to_string())),
        };

        debug!(
            path = %path.display(),
            commands = config.commands.len(),
            "Loaded option table config"
        );
        Ok(config)
    }

    /// Parses YAML text.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Parses JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Selects a command by name, or the first command when `name` is `None`.
    pub fn command(&self, name: Option<&str>) -> Result<&CommandConfig> {
        match name {
            Some(name) => self
                .commands
                .iter()
                .find(|command| command.name == name)
                .ok_or_else(|| CliError::UnknownCommand(name.to_string())),
            None => self.commands.first().ok_or(CliError::NoCommands),
        }
    }

    /// Validates command names and every command's option table.
    pub fn validate(&self) -> Result<()> {
        if self.commands.is_empty() {
            return Err(CliError::NoCommands);
        }

        let names = self.commands.iter().map(|command| command.name.as_str());
        if let Some(err) = validate_command_names(names).into_iter().next() {
            return Err(CliError::InvalidCommands(err));
        }

        for command in &self.commands {
            let specs = command.option_specs();
            if let Some(source) = validate_table(&specs).into_iter().next() {
                return Err(CliError::InvalidTable {
                    command: command.name.clone(),
                    source,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use optable_core::ValidationError;

    use super::*;

    const FOO_YAML: &str = r#"
version: "1.0"
commands:
  - name: foo
    help: Example command
    options:
      - { short: f, long: flag, kind: flag, help: Set a flag }
      - { short: s, long: string, kind: string }
      - { short: n, long: number, kind: integer }
  - name: help
"#;

    #[test]
    fn test_yaml_table_decodes() {
        let config = TableConfig::from_yaml_str(FOO_YAML).unwrap();
        let foo = config.command(Some("foo")).unwrap();
        let specs = foo.option_specs();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].short, Some('f'));
        assert_eq!(specs[0].help, "Set a flag");
        assert_eq!(specs[2].kind, OptionKind::Integer);
        assert!(config.command(Some("help")).unwrap().options.is_empty());
    }

    #[test]
    fn test_json_table_decodes() {
        let raw = r#"{"commands":[{"name":"run","options":[{"long":"jobs","kind":"integer"}]}]}"#;
        let config = TableConfig::from_json_str(raw).unwrap();
        let run = config.command(None).unwrap();
        assert_eq!(run.options[0].short, None);
        assert_eq!(run.options[0].kind, OptionKind::Integer);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let raw = r#"{"commands":[{"name":"run","options":[{"long":"x","kind":"float"}]}]}"#;
        assert!(matches!(
            TableConfig::from_json_str(raw),
            Err(CliError::JsonError(_))
        ));
    }

    #[test]
    fn test_command_selection_errors() {
        let config = TableConfig::from_yaml_str(FOO_YAML).unwrap();
        assert!(matches!(
            config.command(Some("bar")),
            Err(CliError::UnknownCommand(name)) if name == "bar"
        ));

        let empty = TableConfig::from_yaml_str("commands: []").unwrap();
        assert!(matches!(empty.command(None), Err(CliError::NoCommands)));
        assert!(matches!(empty.validate(), Err(CliError::NoCommands)));
    }

    #[test]
    fn test_validate_reports_command_and_source() {
        let raw = r#"
commands:
  - name: foo
    options:
      - { short: f, long: flag }
      - { short: f, long: force }
"#;
        let config = TableConfig::from_yaml_str(raw).unwrap();
        match config.validate() {
            Err(CliError::InvalidTable { command, source }) => {
                assert_eq!(command, "foo");
                assert_eq!(source, ValidationError::DuplicateShortOption('f'));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_picks_decoder_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("table.yml");
        std::fs::write(&yaml, FOO_YAML).unwrap();
        assert_eq!(TableConfig::load(&yaml).unwrap().commands.len(), 2);

        let toml = dir.path().join("table.toml");
        std::fs::write(&toml, "commands = []").unwrap();
        assert!(matches!(
            TableConfig::load(&toml),
            Err(CliError::UnsupportedFormat(_))
        ));
    }
}

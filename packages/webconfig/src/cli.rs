//! Command-line interface for inspecting flattened configuration files.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::data::ConfigData;
use crate::diagnostics::{DiagnosticCollector, DiagnosticLevel};
use crate::error::{ConfigError, Result};
use crate::source::ConfigFileSource;

/// webconfig - Flatten web.config / app.config files into key/value pairs.
#[derive(Parser)]
#[command(name = "webconfig")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a configuration file and print every flattened entry.
    Dump {
        /// Path to the *.config file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only print entries below this key path (e.g. appSettings)
        #[arg(short, long)]
        section: Option<String>,

        /// Treat a missing file as empty instead of failing
        #[arg(long)]
        optional: bool,

        /// Print parser diagnostics to stderr
        #[arg(long)]
        diagnostics: bool,
    },

    /// Print the value of a single key (case-insensitive).
    Get {
        /// Path to the *.config file
        file: PathBuf,

        /// Colon-delimited key, e.g. appSettings:Theme
        key: String,
    },

    /// List the immediate child segments below a key path.
    Keys {
        /// Path to the *.config file
        file: PathBuf,

        /// Parent key path; lists the top-level sections when omitted
        parent: Option<String>,
    },
}

/// Output format for `dump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `key = value` lines
    Text,
    Json,
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            file,
            format,
            section,
            optional,
            diagnostics,
        } => dump_command(&file, format, section.as_deref(), optional, diagnostics),
        Commands::Get { file, key } => get_command(&file, &key),
        Commands::Keys { file, parent } => keys_command(&file, parent.as_deref()),
    }
}

/// Execute the dump command.
fn dump_command(
    file: &Path,
    format: OutputFormat,
    section: Option<&str>,
    optional: bool,
    show_diagnostics: bool,
) -> Result<()> {
    let source = ConfigFileSource::new(file, optional)?;
    let mut collector = DiagnosticCollector::new();
    let data = source.load_with_diagnostics(&mut collector)?;

    let data = match section {
        Some(section) => select_section(&data, section),
        None => data,
    };

    print!("{}", render(&data, format)?);

    if show_diagnostics {
        for diagnostic in collector.diagnostics() {
            let level = match diagnostic.level {
                DiagnosticLevel::Info => style(diagnostic.level.as_str()).dim(),
                DiagnosticLevel::Warning => style(diagnostic.level.as_str()).yellow().bold(),
            };
            eprintln!("{level}: {}", diagnostic.message);
        }
    }

    Ok(())
}

/// Execute the get command.
fn get_command(file: &Path, key: &str) -> Result<()> {
    let data = ConfigFileSource::new(file, false)?.load()?;
    let value = data
        .get(key)
        .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;
    println!("{value}");
    Ok(())
}

/// Execute the keys command.
fn keys_command(file: &Path, parent: Option<&str>) -> Result<()> {
    let data = ConfigFileSource::new(file, false)?.load()?;
    for key in data.child_keys(parent) {
        println!("{key}");
    }
    Ok(())
}

/// Entries below `section`, re-keyed relative to it.
fn select_section(data: &ConfigData, section: &str) -> ConfigData {
    data.section(section).collect()
}

/// Render a store in the requested format.
fn render(data: &ConfigData, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => data
            .iter()
            .map(|(key, value)| format!("{} = {value}\n", style(key).cyan()))
            .collect(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(data)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml_ng::to_string(data)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigData {
        [
            ("appSettings:Theme", "dark"),
            ("connectionStrings:Default", "Server=."),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_cli_parse_dump_defaults() {
        let cli = Cli::parse_from(["webconfig", "dump", "web.config"]);

        let Commands::Dump {
            file,
            format,
            section,
            optional,
            diagnostics,
        } = cli.command
        else {
            panic!("expected dump command");
        };
        assert_eq!(file, PathBuf::from("web.config"));
        assert_eq!(format, OutputFormat::Text);
        assert!(section.is_none());
        assert!(!optional);
        assert!(!diagnostics);
    }

    #[test]
    fn test_cli_parse_dump_with_options() {
        let cli = Cli::parse_from([
            "webconfig",
            "dump",
            "web.config",
            "--format",
            "json",
            "--section",
            "appSettings",
            "--optional",
        ]);

        let Commands::Dump {
            format,
            section,
            optional,
            ..
        } = cli.command
        else {
            panic!("expected dump command");
        };
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(section, Some("appSettings".to_string()));
        assert!(optional);
    }

    #[test]
    fn test_cli_parse_get() {
        let cli = Cli::parse_from(["webconfig", "get", "web.config", "appSettings:Theme"]);

        let Commands::Get { file, key } = cli.command else {
            panic!("expected get command");
        };
        assert_eq!(file, PathBuf::from("web.config"));
        assert_eq!(key, "appSettings:Theme");
    }

    #[test]
    fn test_cli_parse_keys() {
        let cli = Cli::parse_from(["webconfig", "keys", "web.config", "location"]);

        let Commands::Keys { file, parent } = cli.command else {
            panic!("expected keys command");
        };
        assert_eq!(file, PathBuf::from("web.config"));
        assert_eq!(parent, Some("location".to_string()));

        let cli = Cli::parse_from(["webconfig", "keys", "web.config"]);
        let Commands::Keys { parent, .. } = cli.command else {
            panic!("expected keys command");
        };
        assert!(parent.is_none());
    }

    #[test]
    fn test_select_section() {
        let section = select_section(&sample(), "appsettings");
        assert_eq!(section.get("Theme"), Some("dark"));
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["appSettings:Theme"], "dark");
        assert_eq!(parsed["connectionStrings:Default"], "Server=.");
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&sample(), OutputFormat::Yaml).unwrap();
        let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed["appSettings:Theme"].as_str(), Some("dark"));
    }
}

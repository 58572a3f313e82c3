// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `coursedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coursedag",
    version,
    about = "Lay out a course catalog as a prerequisite graph and track completed courses.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Coursedag.toml` in the current working directory. A missing
    /// default file is not an error.
    #[arg(long, value_name = "PATH", default_value = "Coursedag.toml")]
    pub config: String,

    /// Catalog JSON file. Overrides `[catalog].path`.
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Only keep courses of this subject. Overrides `[catalog].major`.
    #[arg(long, value_name = "NAME", global = true)]
    pub major: Option<String>,

    /// Completed-courses file. Overrides `[progress].path`.
    #[arg(long, value_name = "PATH", global = true)]
    pub progress: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COURSEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Parse + validate config and catalog, print a summary, touch nothing.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the planned nodes and edges.
    Layout {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print every course with its status, or details for one course.
    Status {
        #[arg(value_name = "ID")]
        id: Option<String>,
    },
    /// Flip the completed state of each course, in order, and save.
    Toggle {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },
    /// List the subjects present in the catalog.
    Majors,
    /// List prerequisite cycles found in the catalog.
    Cycles,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toggle_with_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "coursedag",
            "toggle",
            "BSCI101",
            "BSCI201",
            "--major",
            "BSCI",
        ])
        .unwrap();

        assert_eq!(args.config, "Coursedag.toml");
        assert_eq!(args.major.as_deref(), Some("BSCI"));
        match args.command {
            Command::Toggle { ids } => assert_eq!(ids, vec!["BSCI101", "BSCI201"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn layout_defaults_to_json() {
        let args = CliArgs::try_parse_from(["coursedag", "layout"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Layout {
                format: OutputFormat::Json
            }
        ));
    }

    #[test]
    fn toggle_requires_an_id() {
        assert!(CliArgs::try_parse_from(["coursedag", "toggle"]).is_err());
    }
}

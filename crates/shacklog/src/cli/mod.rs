//! Command-line interface for shacklog.
//!
//! This module provides the CLI structure for the `shacklog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, EntryCommand, LogCommand, StatsCommand};

/// shacklog - log amateur radio contacts to an ADIF file
///
/// Records QSOs entered at the terminal, validates and normalizes the
/// field values, and appends each contact to a plain-text ADIF log.
#[derive(Debug, Parser)]
#[command(name = "shacklog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute; defaults to the interactive entry form
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive QSO entry form (the default)
    Entry(EntryCommand),

    /// Log a single QSO from the command line
    Log(Box<LogCommand>),

    /// Show log file statistics
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "shacklog");
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["shacklog"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["shacklog", "-q"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);

        let cli = Cli::try_parse_from(["shacklog", "-v"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);

        let cli = Cli::try_parse_from(["shacklog", "-vv"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);

        let cli = Cli::try_parse_from(["shacklog"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_parse_entry_with_log_override() {
        let cli = Cli::try_parse_from(["shacklog", "entry", "--log", "/tmp/x.adi"]).unwrap();
        match cli.command {
            Some(Command::Entry(cmd)) => {
                assert_eq!(cmd.log.as_deref(), Some(std::path::Path::new("/tmp/x.adi")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_command() {
        let cli = Cli::try_parse_from([
            "shacklog", "log", "--call", "W1AW", "--mode", "CW", "--freq", "14040",
            "--rst-sent", "599", "--field", "STATE=PA",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Log(cmd)) => {
                assert_eq!(cmd.call, "W1AW");
                assert_eq!(cmd.mode, "CW");
                assert_eq!(cmd.freq.as_deref(), Some("14040"));
                assert_eq!(cmd.rst_sent.as_deref(), Some("599"));
                assert_eq!(cmd.field, vec!["STATE=PA".to_string()]);
                assert!(cmd.date.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_log_requires_call_and_mode() {
        assert!(Cli::try_parse_from(["shacklog", "log", "--mode", "CW"]).is_err());
        assert!(Cli::try_parse_from(["shacklog", "log", "--call", "W1AW"]).is_err());
    }

    #[test]
    fn test_parse_stats_json() {
        let cli = Cli::try_parse_from(["shacklog", "stats", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Stats(StatsCommand { json: true }))
        ));
    }

    #[test]
    fn test_parse_config_subcommands() {
        let cli = Cli::try_parse_from(["shacklog", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Show { json: false }))
        ));

        let cli = Cli::try_parse_from(["shacklog", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Path))
        ));
    }
}

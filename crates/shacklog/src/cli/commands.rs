//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Entry command arguments.
#[derive(Debug, Default, Args)]
pub struct EntryCommand {
    /// Append to this log file instead of the configured one
    #[arg(short, long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

/// One-shot log command arguments.
///
/// Date and time default to the current UTC clock; the band is derived
/// from the frequency when not given explicitly.
#[derive(Debug, Args)]
pub struct LogCommand {
    /// Callsign of the worked station
    #[arg(long)]
    pub call: String,

    /// Operating mode (one of the configured modes)
    #[arg(short, long)]
    pub mode: String,

    /// QSO date (YYYY-MM-DD, MM/DD/YY or MM/DD/YYYY); defaults to today (UTC)
    #[arg(short, long)]
    pub date: Option<String>,

    /// QSO start time (HH:MM or HHMM); defaults to now (UTC)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Frequency in kHz
    #[arg(short, long)]
    pub freq: Option<String>,

    /// Band designator; normally derived from the frequency
    #[arg(short, long)]
    pub band: Option<String>,

    /// Signal report sent
    #[arg(long, value_name = "RST")]
    pub rst_sent: Option<String>,

    /// Signal report received
    #[arg(long, value_name = "RST")]
    pub rst_rcvd: Option<String>,

    /// Transmit power in watts
    #[arg(short, long, value_name = "WATTS")]
    pub power: Option<String>,

    /// Free-text comment
    #[arg(long)]
    pub comment: Option<String>,

    /// Set a configured custom field (repeatable)
    #[arg(long, value_name = "NAME=VALUE")]
    pub field: Vec<String>,

    /// Append to this log file instead of the configured one
    #[arg(short, long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        file: Option<PathBuf>,
    },
}

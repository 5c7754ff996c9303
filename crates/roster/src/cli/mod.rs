//! Command-line interface for roster.
//!
//! There are no subcommands: running `roster` starts the interactive menu.
//! The flags only adjust logging and where configuration and data live.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// roster - Keep a small list of student records in a JSON file
///
/// Starts an interactive menu to add, view, update, delete and find students.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Student data file (overrides configuration)
    #[arg(short, long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Debug,
            }
        }
    }
}

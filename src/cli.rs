//! Command-line argument definition and settings resolution.
//!
//! Arguments mirror the tool's wire-level simplicity: a puzzle file, a port
//! and a baud rate. Values omitted on the command line fall back to the
//! configuration file defaults, which in turn fall back to built-ins.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "puzzlecom",
    version,
    about = "Send a puzzle payload to a serial-attached solver device and print its response."
)]
pub struct Args {
    /// A file containing the unsolved puzzle.
    #[arg(long)]
    pub puzzle_file: PathBuf,

    /// Serial port to send the data to.
    #[arg(long)]
    pub port: Option<String>,

    /// Serial port baud rate.
    #[arg(long)]
    pub baudrate: Option<u32>,

    /// Path to an explicit configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Fully resolved settings for one transfer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path to the puzzle payload file.
    pub puzzle_file: PathBuf,
    /// Serial device path.
    pub port: String,
    /// Baud rate.
    pub baud_rate: u32,
    /// Per-read poll timeout for the response loop.
    pub poll_timeout: Duration,
}

impl Settings {
    /// Merge command-line arguments over configuration defaults.
    pub fn resolve(args: &Args, config: &Config) -> Self {
        Self {
            puzzle_file: args.puzzle_file.clone(),
            port: args
                .port
                .clone()
                .unwrap_or_else(|| config.serial.default_port.clone()),
            baud_rate: args.baudrate.unwrap_or(config.serial.default_baud),
            poll_timeout: config.serial.poll_timeout(),
        }
    }
}

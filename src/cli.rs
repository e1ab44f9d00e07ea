//! Command-line interface parsing for tubestat
//!
//! This module handles parsing of CLI arguments using clap: the `line`
//! subcommand for transit line status and the `mail` subcommand for
//! mailbox reports.

use std::env;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::lines::Line;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified line name is not recognized
    #[error(
        "Invalid line: '{0}'. Valid lines: district, circle, victoria, central, northern, \
         bakerloo, hammersmith-city, jubilee, metropolitan, piccadilly, waterloo-city, dlr"
    )]
    InvalidLine(String),
}

/// tubestat - transit line status and mail reports for a status bar
#[derive(Parser, Debug)]
#[command(name = "tubestat")]
#[command(about = "London transit line status and mailbox reports for a status bar")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current status of a transit line, throttled through a disk cache
    Line(LineArgs),
    /// Report unread mail, once to stdout or wrapping an i3bar status stream
    Mail(MailArgs),
}

/// Arguments for the `line` subcommand
#[derive(Args, Debug)]
pub struct LineArgs {
    /// The line to report on (e.g. district, hammersmith-city, dlr)
    #[arg(long, value_name = "LINE")]
    pub line: String,

    /// Use the verbose output format ("TFL DISTRICT line has ...")
    #[arg(long)]
    pub large: bool,

    /// Minimum number of minutes between polls of the TfL API
    #[arg(long, value_name = "MINUTES", default_value_t = 5)]
    pub interval: u64,

    /// Poll the API on every invocation instead of throttling
    #[arg(long)]
    pub no_throttle: bool,

    /// Path of the last-poll timestamp file
    #[arg(long, value_name = "PATH")]
    pub timestamp_file: Option<PathBuf>,

    /// Path of the cached status file
    #[arg(long, value_name = "PATH")]
    pub status_file: Option<PathBuf>,
}

impl LineArgs {
    /// Validates the line name against the fixed allow-list.
    pub fn parse_line(&self) -> Result<Line, CliError> {
        parse_line_arg(&self.line)
    }

    /// Returns the timestamp file path, defaulting under the system temp dir.
    pub fn timestamp_path(&self) -> PathBuf {
        self.timestamp_file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("tubestat-poll"))
    }

    /// Returns the status cache path, defaulting under the system temp dir.
    pub fn status_path(&self) -> PathBuf {
        self.status_file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("tubestat-status"))
    }
}

/// Arguments for the `mail` subcommand
#[derive(Args, Debug)]
pub struct MailArgs {
    /// Mailbox paths to check; relative paths resolve against $HOME.
    /// Defaults to the system spool for the current user.
    #[arg(value_name = "MAILBOX")]
    pub mailboxes: Vec<String>,

    /// Check the mailboxes, print reports and exit instead of wrapping a stream
    #[arg(short = '1', long)]
    pub once: bool,

    /// Text to print when no new mail is found
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub nomail: String,

    /// Maildir folder names to ignore (repeatable)
    #[arg(short, long, value_name = "FOLDER")]
    pub ignore: Vec<String>,

    /// Index at which mail entries are inserted into the status line
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub position: usize,

    /// Color used when there is no new mail
    #[arg(long, value_name = "COLOR", default_value = "#00FF00")]
    pub good: String,

    /// Color used when there is new mail
    #[arg(long, value_name = "COLOR", default_value = "#FFFF00")]
    pub degraded: String,

    /// Color used when a path is not a mailbox
    #[arg(long, value_name = "COLOR", default_value = "#FF0000")]
    pub bad: String,
}

impl MailArgs {
    /// Returns the mailboxes to check, falling back to the user's spool.
    pub fn mailboxes_or_default(&self) -> Vec<String> {
        if !self.mailboxes.is_empty() {
            return self.mailboxes.clone();
        }
        let user = env::var("USER").unwrap_or_else(|_| "nobody".to_string());
        vec![format!("/var/mail/{}", user)]
    }
}

/// Parses a line name argument into a Line enum.
///
/// # Arguments
/// * `s` - The line name from the CLI
///
/// # Returns
/// * `Ok(Line)` if the string matches a supported line
/// * `Err(CliError::InvalidLine)` echoing the full allow-list otherwise
pub fn parse_line_arg(s: &str) -> Result<Line, CliError> {
    Line::from_str(s).ok_or_else(|| CliError::InvalidLine(s.to_string()))
}

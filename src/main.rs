//! tubestat - London transit line status and mail reports for a status bar
//!
//! Each invocation is a single linear pass: parse arguments, decide via the
//! throttle gate whether to poll the TfL API or reuse the cached status,
//! format one line and print it. The `mail` subcommand either reports
//! mailbox state once or wraps an i3bar stream, injecting mail entries.

use std::io;
use std::time::Duration;

use clap::Parser;

use tubestat::bar;
use tubestat::cache::StatusCache;
use tubestat::cli::{Cli, Command, LineArgs, MailArgs};
use tubestat::mail::{self, MailColors};
use tubestat::output::{format_status, Format};
use tubestat::status::line_status;
use tubestat::tfl::TflClient;
use tubestat::throttle::{should_refresh, SystemClock};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Line(args) => run_line(args).await,
        Command::Mail(args) => run_mail(args),
    };

    if let Err(e) = result {
        eprintln!("tubestat: {}", e);
        std::process::exit(1);
    }
}

/// Runs the `line` subcommand: throttle, fetch or read cache, print.
async fn run_line(args: LineArgs) -> Result<(), Box<dyn std::error::Error>> {
    let line = args.parse_line()?;

    // The interval flag is minutes; the throttle compares seconds.
    let interval = Duration::from_secs(args.interval * 60);
    let refresh = should_refresh(
        interval,
        !args.no_throttle,
        &args.timestamp_path(),
        &SystemClock,
    )?;

    let client = TflClient::new();
    let cache = StatusCache::new(args.status_path());
    let status = line_status(line, refresh, |l| client.fetch_status(l), &cache).await?;

    let format = if args.large { Format::Large } else { Format::Small };
    println!("{}", format_status(line, &status, format));

    Ok(())
}

/// Runs the `mail` subcommand, once or as a stream wrapper.
fn run_mail(args: MailArgs) -> Result<(), Box<dyn std::error::Error>> {
    let colors = MailColors {
        good: args.good.clone(),
        degraded: args.degraded.clone(),
        bad: args.bad.clone(),
    };
    let mailboxes = args.mailboxes_or_default();

    if args.once {
        for mailbox in &mailboxes {
            let path = mail::resolve_mailbox(mailbox);
            let report = mail::check_mailbox(&path, &args.ignore)?;
            println!("{}", report.render(&args.nomail));
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    bar::run_wrapper(stdin.lock(), stdout.lock(), args.position, || {
        mail_entries(&mailboxes, &args, &colors)
    })?;

    Ok(())
}

/// Builds one bar entry per mailbox, reporting scan failures inline
/// rather than aborting the whole status stream.
fn mail_entries(
    mailboxes: &[String],
    args: &MailArgs,
    colors: &MailColors,
) -> Vec<serde_json::Value> {
    mailboxes
        .iter()
        .map(|mailbox| {
            let path = mail::resolve_mailbox(mailbox);
            match mail::check_mailbox(&path, &args.ignore) {
                Ok(report) => {
                    bar::mail_entry(mailbox, &report.render(&args.nomail), report.color(colors))
                }
                Err(e) => bar::mail_entry(mailbox, &e.to_string(), &colors.bad),
            }
        })
        .collect()
}

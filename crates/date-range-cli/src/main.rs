//! `daterange` CLI — parse, expand, and format natural-language date ranges.
//!
//! ## Usage
//!
//! ```sh
//! # Parse and render compactly
//! daterange parse "jan 1 8am-5pm 2009"
//!
//! # Structured output
//! daterange --json parse "thursday evenings"
//!
//! # Occurrences of a repeating range inside a window
//! daterange expand thursdays --within "7/1/09 - 7/31/09"
//!
//! # Pin "now" for reproducible output
//! daterange --now 2009-09-01 parse "sept 17-28"
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use date_range::{
    Clock, DateRange, FixedClock, PhraseParser, RangeParser, RecurrenceKind, SystemClock,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "daterange",
    version,
    about = "Parse, expand, and format natural-language date ranges"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reference instant: YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS], or "YYYY-MM-DD HH:MM"
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// Print JSON instead of compact text
    #[arg(long, global = true)]
    json: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a range and print it back in compact form
    Parse {
        /// Range text, e.g. "sept 17-28" or "thursday evenings"
        text: String,
    },
    /// List the occurrences of a range that overlap a window
    Expand {
        /// Range text; weekly and daily repeats expand into occurrences
        text: String,
        /// Window text, e.g. "7/1/09 - 7/31/09"
        #[arg(long)]
        within: String,
    },
}

#[derive(Serialize)]
struct RangeOutput {
    start: NaiveDateTime,
    end: NaiveDateTime,
    recurrence: RecurrenceKind,
    text: String,
}

impl RangeOutput {
    fn new(range: &DateRange, clock: FixedClock) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            recurrence: range.kind(),
            text: range.format(clock),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let clock = FixedClock::new(cli.now.unwrap_or_else(|| SystemClock.now()));
    debug!(now = %clock.now(), "reference instant");
    let parser = RangeParser::new().with_clock(clock);

    match cli.command {
        Commands::Parse { text } => {
            let range = parse_range(&parser, &text)?;
            if cli.json {
                let out = RangeOutput::new(&range, clock);
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", range.format(clock));
            }
        }
        Commands::Expand { text, within } => {
            let range = parse_range(&parser, &text)?;
            let bounds = parse_range(&parser, &within)?;
            let occurrences = range.overlapping(&bounds);
            if cli.json {
                let out: Vec<RangeOutput> = occurrences
                    .iter()
                    .map(|occurrence| RangeOutput::new(occurrence, clock))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", occurrences.format(clock));
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_range(parser: &RangeParser<PhraseParser, FixedClock>, text: &str) -> Result<DateRange> {
    parser
        .try_parse(text)
        .with_context(|| format!("Failed to parse date range: '{}'", text))
}

fn parse_now(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS], got '{}'", raw))
}

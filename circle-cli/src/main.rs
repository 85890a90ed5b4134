mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use circle_core::config::CirclesConfig;
use circle_core::leader::Leader;
use circle_core::roster::Roster;
use clap::{Args, Parser, Subcommand};

use crate::commands::export::Format;
use crate::utils::range::{Span, resolve_range, today};

#[derive(Parser)]
#[command(name = "circles")]
#[command(about = "View circle leaders' meeting calendars and track attendance")]
struct Cli {
    /// Use this roster file instead of the configured one
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RangeArgs {
    /// Show meetings from this date (YYYY-MM-DD, or e.g. "next monday")
    #[arg(long)]
    from: Option<String>,

    /// Show meetings until this date, inclusive
    #[arg(long)]
    to: Option<String>,

    /// Use the current month instead of the current week
    #[arg(long)]
    month: bool,

    /// Only include this leader (by id)
    #[arg(short, long)]
    leader: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List meetings in a date range (defaults to this week)
    Agenda {
        #[command(flatten)]
        range: RangeArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List leaders with their parsed schedule and attendance
    Leaders,
    /// Set a leader's attendance (received, did_not_meet, skipped, not_received)
    Status { leader: String, status: String },
    /// Export meetings as iCalendar or JSON
    Export {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(short, long, value_enum, default_value = "ics")]
        format: Format,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = CirclesConfig::load()?;
    let roster_path = cli.roster.clone().unwrap_or_else(|| config.roster_path());
    let mut roster = Roster::load(&roster_path)?;
    tracing::debug!(
        roster = %roster_path.display(),
        leaders = roster.leaders().len(),
        "roster loaded"
    );
    let default_duration = config.default_duration_minutes()?;
    let tz = config.timezone()?;

    match cli.command {
        Commands::Agenda { range, json } => {
            require_leaders(&roster)?;
            let leaders = select_leaders(&roster, range.leader.as_deref())?;
            let today = today(tz);
            let span = if range.month { Span::Month } else { Span::Week };
            let date_range = resolve_range(range.from.as_deref(), range.to.as_deref(), span, today)?;
            commands::agenda::run(&leaders, date_range, default_duration, today, json)
        }
        Commands::Leaders => commands::leaders::run(roster.leaders(), default_duration),
        Commands::Status { leader, status } => {
            require_leaders(&roster)?;
            commands::status::run(&mut roster, &leader, &status)
        }
        Commands::Export {
            range,
            format,
            output,
        } => {
            require_leaders(&roster)?;
            let leaders = select_leaders(&roster, range.leader.as_deref())?;
            let span = if range.month { Span::Month } else { Span::Week };
            let date_range =
                resolve_range(range.from.as_deref(), range.to.as_deref(), span, today(tz))?;
            commands::export::run(
                &leaders,
                date_range,
                default_duration,
                tz,
                format,
                output.as_deref(),
            )
        }
    }
}

fn require_leaders(roster: &Roster) -> Result<()> {
    if roster.leaders().is_empty() {
        anyhow::bail!(
            "No leaders found in {}.\n\n\
            Add leaders to the roster file, e.g.:\n\n  \
            [[leader]]\n  \
            name = \"Jane Doe\"\n  \
            day = \"Wednesday\"\n  \
            time = \"7:00 PM\"\n  \
            frequency = \"1st & 3rd\"",
            roster.path().display()
        );
    }

    Ok(())
}

fn select_leaders(roster: &Roster, leader_filter: Option<&str>) -> Result<Vec<Leader>> {
    match leader_filter {
        Some(id) => match roster.find(id) {
            Some(leader) => Ok(vec![leader.clone()]),
            None => {
                let available: Vec<_> = roster.leaders().iter().map(|l| l.id()).collect();
                anyhow::bail!(
                    "Leader '{}' not found. Available: {}",
                    id,
                    available.join(", ")
                );
            }
        },
        None => Ok(roster.leaders().to_vec()),
    }
}

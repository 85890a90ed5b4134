use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use circle_core::agenda::build_agenda;
use circle_core::date_range::DateRange;
use circle_core::export::{agenda_to_ics, agenda_to_json};
use circle_core::leader::Leader;
use clap::ValueEnum;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Ics,
    Json,
}

pub fn run(
    leaders: &[Leader],
    range: DateRange,
    default_duration: i64,
    tz: Tz,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let entries = build_agenda(leaders, &range, default_duration);

    let content = match format {
        Format::Ics => agenda_to_ics(&entries, tz)?,
        Format::Json => agenda_to_json(&entries)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Could not write {}", path.display()))?;
            eprintln!(
                "{}",
                format!("  Exported {} meetings to {}", entries.len(), path.display()).green()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

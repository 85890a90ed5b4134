use anyhow::Result;
use chrono::NaiveDate;
use circle_core::agenda::{AgendaEntry, build_agenda};
use circle_core::date_range::DateRange;
use circle_core::export::agenda_to_json;
use circle_core::leader::Leader;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(
    leaders: &[Leader],
    range: DateRange,
    default_duration: i64,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let entries = build_agenda(leaders, &range, default_duration);

    if json {
        println!("{}", agenda_to_json(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No meetings in this range".dimmed());
        return Ok(());
    }

    // Group meetings by day
    let mut current_date: Option<NaiveDate> = None;

    for entry in &entries {
        let date = entry.occurrence.date();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date, today).bold());
            current_date = Some(date);
        }

        println!("{}", entry.render());
    }

    print_summary(&entries);

    Ok(())
}

fn print_summary(entries: &[AgendaEntry]) {
    let leaders: std::collections::BTreeSet<_> =
        entries.iter().map(|e| e.occurrence.leader_id.as_str()).collect();

    println!();
    println!(
        "{}",
        format!(
            "{} {} across {} {}",
            entries.len(),
            pluralize("meeting", entries.len()),
            leaders.len(),
            pluralize("leader", leaders.len())
        )
        .dimmed()
    );
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

use anyhow::Result;
use chrono::Weekday;
use circle_core::frequency::parse_frequency;
use circle_core::leader::Leader;
use circle_core::recurrence::Recurrence;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(leaders: &[Leader], default_duration: i64) -> Result<()> {
    if leaders.is_empty() {
        println!("{}", "No leaders in the roster".dimmed());
        return Ok(());
    }

    for leader in leaders {
        println!(
            "{} {} {}",
            leader.name.bold(),
            format!("[{}]", leader.id()).dimmed(),
            leader.attendance().render()
        );
        println!("   {}", describe_schedule(leader, default_duration));
    }

    Ok(())
}

/// One-line schedule summary, or why the leader can't be scheduled.
fn describe_schedule(leader: &Leader, default_duration: i64) -> String {
    let schedule = leader.schedule(default_duration);

    match Recurrence::from_schedule(&schedule) {
        Some(recurrence) => {
            let mut line = format!(
                "{}s at {}, {} ({} min)",
                weekday_name(recurrence.weekday),
                recurrence.time.format("%-I:%M %p"),
                recurrence.frequency,
                recurrence.duration_minutes
            );
            if let Some(anchor) = recurrence.anchor_date {
                line.push_str(&format!(", anchored {}", anchor));
            }
            line
        }
        None => format!(
            "{} day \"{}\", time \"{}\" ({})",
            "Unschedulable:".red(),
            leader.day,
            leader.time,
            parse_frequency(leader.frequency.as_deref())
        ),
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

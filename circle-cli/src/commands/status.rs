use anyhow::Result;
use circle_core::attendance::{AttendanceSink, AttendanceStatus};
use circle_core::roster::Roster;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(roster: &mut Roster, leader_id: &str, status: &str) -> Result<()> {
    let status: AttendanceStatus = status.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let Some(leader) = roster.find(leader_id) else {
        let available: Vec<_> = roster.leaders().iter().map(|l| l.id()).collect();
        anyhow::bail!(
            "Leader '{}' not found. Available: {}",
            leader_id,
            available.join(", ")
        );
    };
    let name = leader.name.clone();
    let previous = leader.attendance();

    roster.set_attendance(leader_id, status)?;

    println!(
        "  {} {} → {}",
        name.bold(),
        previous.render(),
        status.render()
    );

    Ok(())
}

//! TUI rendering traits for circle-core types.
//!
//! Extension traits that add colored terminal rendering to circle-core
//! types using owo_colors. Status colors follow each status's category so
//! every view agrees on what green or red means.

use circle_core::agenda::AgendaEntry;
use circle_core::{AttendanceStatus, StatusColor};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to a status color
pub fn colorize(color: StatusColor, text: &str) -> String {
    match color {
        StatusColor::Green => text.green().to_string(),
        StatusColor::Blue => text.blue().to_string(),
        StatusColor::Yellow => text.yellow().to_string(),
        StatusColor::Red => text.red().to_string(),
    }
}

impl Render for AttendanceStatus {
    fn render(&self) -> String {
        let category = self.category();
        colorize(category.color, &format!("● {}", category.label))
    }
}

impl Render for AgendaEntry {
    fn render(&self) -> String {
        let time = self.occurrence.start.format("%l:%M %p").to_string();
        let tag = format!("[{}]", self.occurrence.leader_id);
        format!(
            "  {} {} {} {}",
            time,
            self.leader_name,
            self.status.render(),
            tag.dimmed()
        )
    }
}

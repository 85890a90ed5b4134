//! Core types for circles.
//!
//! Turns circle leaders' free-text meeting schedules into dated meetings:
//! - `weekday`, `time_of_day` and `frequency` parse what operators type
//! - `recurrence` expands a schedule into `Occurrence`s within a `DateRange`
//! - `attendance` resolves a leader's attendance-report state
//! - `roster`, `config`, `agenda` and `export` wire that up to files

pub mod agenda;
pub mod attendance;
pub mod config;
pub mod date_range;
pub mod error;
pub mod export;
pub mod frequency;
pub mod leader;
pub mod occurrence;
pub mod recurrence;
pub mod roster;
pub mod schedule;
pub mod time_of_day;
pub mod weekday;

pub use attendance::{AttendanceSink, AttendanceStatus, StatusCategory, StatusColor, resolve_attendance};
pub use date_range::DateRange;
pub use error::{CircleError, CircleResult};
pub use frequency::{ParsedFrequency, parse_frequency};
pub use occurrence::Occurrence;
pub use recurrence::{Recurrence, generate};
pub use schedule::LeaderSchedule;

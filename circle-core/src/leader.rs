//! Leader records as stored in the roster.

use serde::{Deserialize, Serialize};

use crate::attendance::{AttendanceStatus, resolve_attendance};
use crate::schedule::LeaderSchedule;

/// A circle leader and their meeting details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    /// Stable identity; derived from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,

    // Schedule, as typed by an operator
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// ISO date; kept as text so a bad value doesn't reject the whole roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,

    // Attendance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_status: Option<String>,
    /// Legacy flag
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub received: bool,
    /// Legacy flag, meaning "did not meet"
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
}

impl Leader {
    pub fn new(name: impl Into<String>, day: impl Into<String>, time: impl Into<String>) -> Self {
        Leader {
            id: None,
            name: name.into(),
            day: day.into(),
            time: time.into(),
            frequency: None,
            anchor_date: None,
            duration_minutes: None,
            attendance_status: None,
            received: false,
            skipped: false,
        }
    }

    pub fn id(&self) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => slug::slugify(&self.name),
        }
    }

    /// Schedule view of this record. `default_duration` applies when the
    /// leader has no usable duration of their own.
    pub fn schedule(&self, default_duration: i64) -> LeaderSchedule {
        let schedule = LeaderSchedule::new(&self.day, &self.time)
            .with_frequency(self.frequency.as_deref())
            .with_anchor_str(self.anchor_date.as_deref())
            .with_duration_minutes(default_duration);

        match self.duration_minutes {
            Some(minutes) => schedule.with_duration_minutes(minutes),
            None => schedule,
        }
    }

    pub fn attendance(&self) -> AttendanceStatus {
        resolve_attendance(self.attendance_status.as_deref(), self.received, self.skipped)
    }

    /// Record a new attendance state.
    ///
    /// Writes the explicit field and keeps the legacy `received` flag in step
    /// for readers that haven't moved to the new field. The legacy `skipped`
    /// flag is cleared since it can no longer be told apart from `skipped`.
    pub fn set_attendance(&mut self, status: AttendanceStatus) {
        self.attendance_status = Some(status.as_str().to_string());
        self.received = status == AttendanceStatus::Received;
        self.skipped = false;
    }
}

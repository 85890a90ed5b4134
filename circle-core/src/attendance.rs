//! Attendance-report state for a leader.
//!
//! Older leader records track attendance with two booleans, `received` and
//! `skipped`. Newer records carry an explicit `attendance_status`. The legacy
//! `skipped` flag meant "the circle did not meet" and maps to
//! [`AttendanceStatus::DidNotMeet`]; the current [`AttendanceStatus::Skipped`]
//! has no legacy equivalent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CircleResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Received,
    DidNotMeet,
    Skipped,
    #[default]
    NotReceived,
}

/// Display color shared by every view of an attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Blue,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCategory {
    pub color: StatusColor,
    pub label: &'static str,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Received,
        AttendanceStatus::DidNotMeet,
        AttendanceStatus::Skipped,
        AttendanceStatus::NotReceived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Received => "received",
            AttendanceStatus::DidNotMeet => "did_not_meet",
            AttendanceStatus::Skipped => "skipped",
            AttendanceStatus::NotReceived => "not_received",
        }
    }

    pub fn category(&self) -> StatusCategory {
        match self {
            AttendanceStatus::Received => StatusCategory {
                color: StatusColor::Green,
                label: "Received",
            },
            AttendanceStatus::DidNotMeet => StatusCategory {
                color: StatusColor::Blue,
                label: "Did Not Meet",
            },
            AttendanceStatus::Skipped => StatusCategory {
                color: StatusColor::Yellow,
                label: "Skipped",
            },
            AttendanceStatus::NotReceived => StatusCategory {
                color: StatusColor::Red,
                label: "Not Received",
            },
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    /// Accepts the stored form ("did_not_meet") as well as the label
    /// ("Did Not Meet") and dashed variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        AttendanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown attendance status '{}'. Expected one of: received, did_not_meet, skipped, not_received",
                    s
                )
            })
    }
}

/// Resolve a leader's attendance from the stored fields.
///
/// An explicit status wins. Otherwise legacy `received` beats legacy
/// `skipped`, and a record with neither is `NotReceived`. Unknown explicit
/// values are ignored.
pub fn resolve_attendance(
    explicit: Option<&str>,
    legacy_received: bool,
    legacy_skipped: bool,
) -> AttendanceStatus {
    if let Some(status) = explicit.and_then(|s| s.parse::<AttendanceStatus>().ok()) {
        return status;
    }

    if legacy_received {
        AttendanceStatus::Received
    } else if legacy_skipped {
        AttendanceStatus::DidNotMeet
    } else {
        AttendanceStatus::NotReceived
    }
}

/// Receives attendance changes made by a user.
///
/// The engine only reads attendance; whoever owns the leader records
/// implements this to persist a new state.
pub trait AttendanceSink {
    fn set_attendance(&mut self, leader_id: &str, status: AttendanceStatus) -> CircleResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- resolution order ---

    #[test]
    fn explicit_status_wins() {
        assert_eq!(resolve_attendance(Some("skipped"), false, false), AttendanceStatus::Skipped);
        assert_eq!(
            resolve_attendance(Some("not_received"), true, true),
            AttendanceStatus::NotReceived
        );
    }

    #[test]
    fn legacy_received() {
        assert_eq!(resolve_attendance(None, true, false), AttendanceStatus::Received);
        assert_eq!(resolve_attendance(None, true, true), AttendanceStatus::Received);
    }

    #[test]
    fn legacy_skipped_means_did_not_meet() {
        assert_eq!(resolve_attendance(None, false, true), AttendanceStatus::DidNotMeet);
    }

    #[test]
    fn nothing_set_is_not_received() {
        assert_eq!(resolve_attendance(None, false, false), AttendanceStatus::NotReceived);
    }

    #[test]
    fn unknown_explicit_value_falls_through() {
        assert_eq!(resolve_attendance(Some("maybe"), true, false), AttendanceStatus::Received);
        assert_eq!(resolve_attendance(Some(""), false, false), AttendanceStatus::NotReceived);
    }

    // --- categories ---

    #[test]
    fn categories() {
        assert_eq!(AttendanceStatus::Received.category().color, StatusColor::Green);
        assert_eq!(AttendanceStatus::DidNotMeet.category().color, StatusColor::Blue);
        assert_eq!(AttendanceStatus::Skipped.category().color, StatusColor::Yellow);
        assert_eq!(AttendanceStatus::NotReceived.category().color, StatusColor::Red);
        assert_eq!(AttendanceStatus::DidNotMeet.category().label, "Did Not Meet");
    }

    // --- parsing ---

    #[test]
    fn parse_labels_and_stored_forms() {
        assert_eq!("Did Not Meet".parse(), Ok(AttendanceStatus::DidNotMeet));
        assert_eq!("did-not-meet".parse(), Ok(AttendanceStatus::DidNotMeet));
        assert_eq!("RECEIVED".parse(), Ok(AttendanceStatus::Received));
        assert!("late".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&AttendanceStatus::DidNotMeet).unwrap();
        assert_eq!(json, "\"did_not_meet\"");
    }
}

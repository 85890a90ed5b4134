//! Occurrences for a whole roster, decorated with attendance.

use serde::Serialize;

use crate::attendance::{AttendanceStatus, StatusCategory};
use crate::date_range::DateRange;
use crate::leader::Leader;
use crate::occurrence::Occurrence;
use crate::recurrence::generate;

/// An occurrence together with the leader details a calendar shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaEntry {
    #[serde(flatten)]
    pub occurrence: Occurrence,
    pub leader_name: String,
    pub status: AttendanceStatus,
    pub category: StatusCategory,
}

/// Generate every leader's meetings in `range`, merged in start order.
///
/// Attendance is resolved from each leader record as the entries are built.
/// Ties on start time are broken by leader id so output is stable.
pub fn build_agenda(leaders: &[Leader], range: &DateRange, default_duration: i64) -> Vec<AgendaEntry> {
    let mut entries: Vec<AgendaEntry> = leaders
        .iter()
        .flat_map(|leader| {
            let status = leader.attendance();
            let schedule = leader.schedule(default_duration);

            generate(&leader.id(), &schedule, range)
                .into_iter()
                .map(move |occurrence| AgendaEntry {
                    occurrence,
                    leader_name: leader.name.clone(),
                    status,
                    category: status.category(),
                })
        })
        .collect();

    entries.sort_by(|a, b| {
        (a.occurrence.start, &a.occurrence.leader_id).cmp(&(b.occurrence.start, &b.occurrence.leader_id))
    });

    entries
}

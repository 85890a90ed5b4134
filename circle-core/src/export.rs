//! Agenda export as iCalendar or JSON.

use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};

use crate::agenda::AgendaEntry;
use crate::error::{CircleError, CircleResult};

/// Generate a VCALENDAR with one VEVENT per agenda entry.
///
/// UIDs come from occurrence ids, so re-exporting an overlapping range
/// updates events in the subscriber's calendar instead of duplicating them.
pub fn agenda_to_ics(entries: &[AgendaEntry], tz: Tz) -> CircleResult<String> {
    let mut cal = Calendar::new();

    let dtstamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for entry in entries {
        let occurrence = &entry.occurrence;

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@circles", occurrence.id));
        ics_event.summary(&format!("{} Circle", entry.leader_name));
        ics_event.add_property("DTSTAMP", &dtstamp);

        // Pin to the organization zone; wall-clock times in a DST gap are skipped
        let Some((start, end)) = occurrence.in_timezone(tz) else {
            tracing::warn!(id = %occurrence.id, "meeting time does not exist in {}, skipping", tz);
            continue;
        };
        add_zoned_property(&mut ics_event, "DTSTART", &start.naive_local(), tz);
        add_zoned_property(&mut ics_event, "DTEND", &end.naive_local(), tz);

        ics_event.description(&format!("Attendance: {}", entry.category.label));
        ics_event.add_property("CATEGORIES", entry.status.as_str());

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

fn add_zoned_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    datetime: &chrono::NaiveDateTime,
    tz: Tz,
) {
    let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", tz.name());
    ics_event.append_property(prop);
}

/// Replace the icalendar crate's PRODID and drop the default CALSCALE.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:CIRCLES\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

pub fn agenda_to_json(entries: &[AgendaEntry]) -> CircleResult<String> {
    serde_json::to_string_pretty(entries).map_err(|e| CircleError::Export(e.to_string()))
}

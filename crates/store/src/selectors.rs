//! Read-only projections over store slices. All pure.

use sf_core::checklist::{Checklist, Section};
use sf_core::{DowntimeEntry, Event, Machine, MachineId};

pub fn machine_by_id(machines: &[Machine], id: MachineId) -> Option<&Machine> {
    machines.iter().find(|m| m.id == id)
}

/// Events for one machine, most recent first (the store keeps the log in
/// that order already), limited to `limit`.
pub fn events_for_machine(events: &[Event], id: MachineId, limit: usize) -> Vec<&Event> {
    events.iter().filter(|e| e.machine_id == id).take(limit).collect()
}

pub fn downtime_for_machine(downtime: &[DowntimeEntry], id: MachineId) -> Vec<&DowntimeEntry> {
    downtime.iter().filter(|d| d.machine_id == id).collect()
}

pub fn first_unacknowledged_alarm(events: &[Event]) -> Option<&Event> {
    events
        .iter()
        .find(|e| e.severity == sf_core::Severity::Alarm && !e.acknowledged)
}

fn completion_pct(checked: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((checked as f64 / total as f64) * 100.0).round() as u8
}

pub fn section_completion(checklist: &Checklist, section: Section) -> u8 {
    match checklist.section(section) {
        Some(items) => {
            completion_pct(items.iter().filter(|i| i.checked).count(), items.len())
        }
        None => 0,
    }
}

pub fn overall_completion(checklist: &Checklist) -> u8 {
    completion_pct(checklist.checked_items(), checklist.total_items())
}

/// Case-insensitive name substring match; an empty query matches everything.
pub fn search_machines<'a>(machines: &'a [Machine], query: &str) -> Vec<&'a Machine> {
    let needle = query.trim().to_lowercase();
    machines
        .iter()
        .filter(|m| needle.is_empty() || m.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sf_core::checklist::ChecklistItem;
    use sf_core::{MachineStatus, Severity};

    fn machine(id: u64, name: &str) -> Machine {
        Machine {
            id,
            name: name.to_string(),
            status: MachineStatus::Run,
            last_heartbeat_ms: 0,
            health_score: 80,
            units_per_min: 1.0,
        }
    }

    fn event(id: u64, machine_id: u64) -> Event {
        Event {
            id,
            machine_id,
            ts_ms: id as i64,
            severity: Severity::Info,
            message: String::new(),
            acknowledged: false,
        }
    }

    #[test]
    fn events_for_machine_preserves_order_and_limit() {
        let events = vec![event(5, 1), event(4, 2), event(3, 1), event(2, 1), event(1, 1)];
        let got = events_for_machine(&events, 1, 3);
        let ids: Vec<u64> = got.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 3, 2]);
    }

    #[test]
    fn completion_rounds_and_handles_empty_sections() {
        let mut doc = Checklist::default();
        doc.sections.insert(
            Section::Network,
            Arc::new(vec![
                ChecklistItem { item: "a".to_string(), checked: true },
                ChecklistItem { item: "b".to_string(), checked: false },
                ChecklistItem { item: "c".to_string(), checked: false },
            ]),
        );
        assert_eq!(section_completion(&doc, Section::Network), 33);

        doc.sections.insert(Section::Handoff, Arc::new(Vec::new()));
        assert_eq!(section_completion(&doc, Section::Handoff), 0);
    }

    #[test]
    fn overall_completion_is_zero_for_fresh_document() {
        assert_eq!(overall_completion(&Checklist::default()), 0);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let machines = vec![machine(1, "CNC Mill 1"), machine(2, "Press Brake"), machine(3, "CNC Mill 2")];
        let hits = search_machines(&machines, "mill");
        assert_eq!(hits.len(), 2);
        assert!(search_machines(&machines, "").len() == 3);
        assert!(search_machines(&machines, "laser").is_empty());
    }
}

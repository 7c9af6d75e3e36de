//! Pure state transitions. Each reducer is `(slice, action) -> slice`,
//! returning a new `Arc` when a change applies and `Arc::clone` of the input
//! otherwise, so callers can detect no-ops by pointer identity.

use std::sync::Arc;

use sf_core::checklist::{Checklist, ChecklistItem};
use sf_core::{DowntimeEntry, Event, Machine, TsMs};

use crate::actions::Action;

/// Bounded event log, newest first; oldest entries drop off silently.
pub const MAX_EVENTS: usize = 50;

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

pub fn events_reducer(events: &Arc<Vec<Event>>, action: &Action, now_ms: TsMs) -> Arc<Vec<Event>> {
    match action {
        Action::AddEvent { machine_id, severity, message } => {
            let id = next_id(events.iter().map(|e| e.id));
            let mut next = Vec::with_capacity((events.len() + 1).min(MAX_EVENTS));
            next.push(Event {
                id,
                machine_id: *machine_id,
                ts_ms: now_ms,
                severity: *severity,
                message: message.clone(),
                acknowledged: false,
            });
            next.extend(events.iter().take(MAX_EVENTS - 1).cloned());
            Arc::new(next)
        }
        Action::AcknowledgeEvent { event_id } => {
            if !events.iter().any(|e| e.id == *event_id) {
                return Arc::clone(events);
            }
            Arc::new(
                events
                    .iter()
                    .map(|e| {
                        if e.id == *event_id {
                            Event { acknowledged: true, ..e.clone() }
                        } else {
                            e.clone()
                        }
                    })
                    .collect(),
            )
        }
        _ => Arc::clone(events),
    }
}

pub fn machines_reducer(
    machines: &Arc<Vec<Machine>>,
    action: &Action,
    now_ms: TsMs,
) -> Arc<Vec<Machine>> {
    match action {
        Action::SetMachineStatus { machine_id, status } => Arc::new(
            machines
                .iter()
                .map(|m| {
                    if m.id == *machine_id {
                        Machine { status: *status, ..m.clone() }
                    } else {
                        m.clone()
                    }
                })
                .collect(),
        ),
        Action::SetThroughput { machine_id, units_per_min } => Arc::new(
            machines
                .iter()
                .map(|m| {
                    if m.id == *machine_id {
                        Machine { units_per_min: *units_per_min, ..m.clone() }
                    } else {
                        m.clone()
                    }
                })
                .collect(),
        ),
        Action::Heartbeat => Arc::new(
            machines
                .iter()
                .map(|m| Machine { last_heartbeat_ms: now_ms, ..m.clone() })
                .collect(),
        ),
        _ => Arc::clone(machines),
    }
}

pub fn downtime_reducer(
    downtime: &Arc<Vec<DowntimeEntry>>,
    action: &Action,
) -> Arc<Vec<DowntimeEntry>> {
    match action {
        Action::AddDowntime { machine_id, start_ms, end_ms, reason, notes } => {
            let id = next_id(downtime.iter().map(|d| d.id));
            let mut next = downtime.as_ref().clone();
            next.push(DowntimeEntry {
                id,
                machine_id: *machine_id,
                start_ms: *start_ms,
                end_ms: *end_ms,
                reason: *reason,
                notes: notes.clone(),
            });
            Arc::new(next)
        }
        _ => Arc::clone(downtime),
    }
}

pub fn checklist_reducer(checklist: &Checklist, action: &Action) -> Checklist {
    match action {
        Action::ToggleChecklistItem { section, item } => {
            let Some(items) = checklist.sections.get(section) else {
                return checklist.clone();
            };
            if !items.iter().any(|i| i.item == *item) {
                return checklist.clone();
            }
            let replaced: Arc<Vec<ChecklistItem>> = Arc::new(
                items
                    .iter()
                    .map(|i| {
                        if i.item == *item {
                            ChecklistItem { item: i.item.clone(), checked: !i.checked }
                        } else {
                            i.clone()
                        }
                    })
                    .collect(),
            );
            // BTreeMap clone only bumps the section Arcs; untouched sections
            // stay pointer-identical across snapshots.
            let mut sections = checklist.sections.clone();
            sections.insert(*section, replaced);
            Checklist { sections }
        }
        Action::LoadChecklist { doc } => doc.clone(),
        _ => checklist.clone(),
    }
}

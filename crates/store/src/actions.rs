//! Actions are tagged unions dispatched through the root reducer. Creator
//! functions validate user input before anything reaches a reducer.

use chrono::NaiveDateTime;

use sf_core::checklist::{Checklist, Section};
use sf_core::{DowntimeReason, EventId, MachineId, MachineStatus, Severity, TsMs};

use crate::StoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddEvent {
        machine_id: MachineId,
        severity: Severity,
        message: String,
    },
    AcknowledgeEvent {
        event_id: EventId,
    },
    SetMachineStatus {
        machine_id: MachineId,
        status: MachineStatus,
    },
    SetThroughput {
        machine_id: MachineId,
        units_per_min: f64,
    },
    /// Stamps `last_heartbeat_ms` on every machine (simulation tick).
    Heartbeat,
    AddDowntime {
        machine_id: MachineId,
        start_ms: TsMs,
        end_ms: TsMs,
        reason: DowntimeReason,
        notes: String,
    },
    ToggleChecklistItem {
        section: Section,
        item: String,
    },
    LoadChecklist {
        doc: Checklist,
    },
}

pub fn add_event(machine_id: MachineId, severity: Severity, message: impl Into<String>) -> Action {
    Action::AddEvent { machine_id, severity, message: message.into() }
}

pub fn acknowledge_event(event_id: EventId) -> Action {
    Action::AcknowledgeEvent { event_id }
}

pub fn set_machine_status(machine_id: MachineId, status: MachineStatus) -> Action {
    Action::SetMachineStatus { machine_id, status }
}

pub fn toggle_checklist_item(section: Section, item: impl Into<String>) -> Action {
    Action::ToggleChecklistItem { section, item: item.into() }
}

/// Validated creator for downtime entries. Rejects inverted or empty ranges
/// with a user-facing message; the form stays open for correction.
pub fn add_downtime(
    machine_id: MachineId,
    start_ms: TsMs,
    end_ms: TsMs,
    reason: DowntimeReason,
    notes: impl Into<String>,
) -> Result<Action, StoreError> {
    if end_ms <= start_ms {
        return Err(StoreError::InvalidDowntime(
            "end time must be after start time".to_string(),
        ));
    }
    Ok(Action::AddDowntime {
        machine_id,
        start_ms,
        end_ms,
        reason,
        notes: notes.into(),
    })
}

/// Same as [`add_downtime`] but parsing `YYYY-MM-DDTHH:MM` form input, the
/// shape a datetime-local field submits. Parsed as local wall-clock time.
pub fn add_downtime_from_form(
    machine_id: MachineId,
    start: &str,
    end: &str,
    reason: DowntimeReason,
    notes: impl Into<String>,
) -> Result<Action, StoreError> {
    let start_ms = parse_form_datetime(start, "start")?;
    let end_ms = parse_form_datetime(end, "end")?;
    add_downtime(machine_id, start_ms, end_ms, reason, notes)
}

fn parse_form_datetime(input: &str, field: &str) -> Result<TsMs, StoreError> {
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| {
            StoreError::InvalidDowntime(format!("could not parse {field} time: {input:?}"))
        })?;
    match naive.and_local_timezone(chrono::Local).earliest() {
        Some(dt) => Ok(dt.timestamp_millis()),
        None => Err(StoreError::InvalidDowntime(format!(
            "{field} time {input:?} does not exist in the local timezone"
        ))),
    }
}

//! Synthetic seed data loaded at startup. All of it is fake; the simulation
//! driver perturbs it from here.

use crate::{
    DowntimeEntry, DowntimeReason, Event, Machine, MachineStatus, Severity, TsMs, MS_PER_MINUTE,
};

pub fn seed_machines(now_ms: TsMs) -> Vec<Machine> {
    let fleet: [(&str, MachineStatus, u8, f64); 6] = [
        ("CNC Mill 1", MachineStatus::Run, 92, 14.2),
        ("CNC Mill 2", MachineStatus::Run, 88, 13.6),
        ("Press Brake", MachineStatus::Idle, 75, 0.0),
        ("Welding Cell", MachineStatus::Run, 96, 8.4),
        ("Paint Line", MachineStatus::Down, 41, 0.0),
        ("Packaging", MachineStatus::Run, 84, 22.0),
    ];
    fleet
        .iter()
        .enumerate()
        .map(|(i, (name, status, health, upm))| Machine {
            id: i as u64 + 1,
            name: (*name).to_string(),
            status: *status,
            last_heartbeat_ms: now_ms,
            health_score: *health,
            units_per_min: *upm,
        })
        .collect()
}

pub fn seed_events(now_ms: TsMs) -> Vec<Event> {
    // Newest first, matching the store's ordering.
    vec![
        Event {
            id: 3,
            machine_id: 5,
            ts_ms: now_ms - 5 * MS_PER_MINUTE,
            severity: Severity::Alarm,
            message: "Paint Line entered DOWN".to_string(),
            acknowledged: false,
        },
        Event {
            id: 2,
            machine_id: 3,
            ts_ms: now_ms - 25 * MS_PER_MINUTE,
            severity: Severity::Warn,
            message: "Press Brake entered IDLE".to_string(),
            acknowledged: false,
        },
        Event {
            id: 1,
            machine_id: 1,
            ts_ms: now_ms - 40 * MS_PER_MINUTE,
            severity: Severity::Info,
            message: "CNC Mill 1 entered RUN".to_string(),
            acknowledged: true,
        },
    ]
}

pub fn seed_downtime(now_ms: TsMs) -> Vec<DowntimeEntry> {
    vec![DowntimeEntry {
        id: 1,
        machine_id: 5,
        start_ms: now_ms - 45 * MS_PER_MINUTE,
        end_ms: now_ms - 5 * MS_PER_MINUTE,
        reason: DowntimeReason::Failure,
        notes: "Pump fault on the paint line".to_string(),
    }]
}

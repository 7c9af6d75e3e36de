//! Core types for the Shopfloor HMI demo.

use serde::{Deserialize, Serialize};

pub type MachineId = u64;
pub type EventId = u64;
pub type DowntimeId = u64;

/// Timestamps are epoch milliseconds throughout.
pub type TsMs = i64;

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    #[serde(rename = "RUN")]
    Run,
    #[serde(rename = "IDLE")]
    Idle,
    #[serde(rename = "DOWN")]
    Down,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Run => "RUN",
            MachineStatus::Idle => "IDLE",
            MachineStatus::Down => "DOWN",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
    pub status: MachineStatus,
    pub last_heartbeat_ms: TsMs,
    /// 0..=100, a synthetic health indicator.
    pub health_score: u8,
    pub units_per_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ALARM")]
    Alarm,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Alarm => "ALARM",
        }
    }

    /// Severity of a status-change event is driven by the new status.
    pub fn for_status(status: MachineStatus) -> Self {
        match status {
            MachineStatus::Down => Severity::Alarm,
            MachineStatus::Idle => Severity::Warn,
            MachineStatus::Run => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub machine_id: MachineId,
    pub ts_ms: TsMs,
    pub severity: Severity,
    pub message: String,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DowntimeReason {
    Maintenance,
    Failure,
    Setup,
}

impl DowntimeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DowntimeReason::Maintenance => "Maintenance",
            DowntimeReason::Failure => "Failure",
            DowntimeReason::Setup => "Setup",
        }
    }
}

/// A recorded interval during which a machine was not producing.
/// `end_ms > start_ms` is enforced where entries are created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DowntimeEntry {
    pub id: DowntimeId,
    pub machine_id: MachineId,
    pub start_ms: TsMs,
    pub end_ms: TsMs,
    pub reason: DowntimeReason,
    pub notes: String,
}

/// Pure projection over the store, recomputed on every dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub alarms_last_24h: usize,
    pub machines_down: usize,
    pub downtime_minutes_today: i64,
}

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub mod checklist;
pub mod runbook;
pub mod seed;

//! Derived metrics: a pure projection over the store slices, recomputed by
//! the root reducer on every dispatch.

use chrono::{Local, TimeZone};

use sf_core::{
    DerivedMetrics, DowntimeEntry, Event, Machine, MachineStatus, Severity, TsMs, MS_PER_DAY,
    MS_PER_MINUTE,
};

/// Local midnight for the day containing `now_ms`, in epoch millis. Falls
/// back to UTC day alignment on out-of-range inputs.
pub fn local_day_start_ms(now_ms: TsMs) -> TsMs {
    let utc_aligned = now_ms - now_ms.rem_euclid(MS_PER_DAY);
    let Some(now) = Local.timestamp_millis_opt(now_ms).earliest() else {
        return utc_aligned;
    };
    let Some(midnight) = now.date_naive().and_hms_opt(0, 0, 0) else {
        return utc_aligned;
    };
    match midnight.and_local_timezone(Local).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => utc_aligned,
    }
}

/// Deterministic given `now_ms`; empty inputs yield all-zero metrics.
///
/// An entry spanning midnight counts its FULL duration toward today as long
/// as its end falls at/after today's local midnight. Intentional: the
/// original dashboard reports it this way and the display is a rough gauge.
pub fn calculate_metrics(
    events: &[Event],
    machines: &[Machine],
    downtime: &[DowntimeEntry],
    now_ms: TsMs,
) -> DerivedMetrics {
    let window_start = now_ms - MS_PER_DAY;
    let alarms_last_24h = events
        .iter()
        .filter(|e| e.severity == Severity::Alarm && e.ts_ms >= window_start)
        .count();

    let machines_down = machines
        .iter()
        .filter(|m| m.status == MachineStatus::Down)
        .count();

    let today_start = local_day_start_ms(now_ms);
    let downtime_ms_today: i64 = downtime
        .iter()
        .filter(|d| d.end_ms >= today_start)
        .map(|d| d.end_ms - d.start_ms)
        .sum();

    DerivedMetrics {
        alarms_last_24h,
        machines_down,
        // Floored for display.
        downtime_minutes_today: downtime_ms_today / MS_PER_MINUTE,
    }
}

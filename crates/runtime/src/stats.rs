//! Loop-level counters for the demo driver. Cheap relaxed atomics; the demo
//! logs a snapshot at the end of every tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Clone, Default)]
pub struct StatsRegistry {
    inner: Arc<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    ticks: AtomicU64,
    actions_dispatched: AtomicU64,
    events_emitted: AtomicU64,
    status_changes: AtomicU64,
    renders: AtomicU64,
}

impl StatsRegistry {
    pub fn inc_ticks(&self, delta: u64) {
        self.inner.ticks.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_actions_dispatched(&self, delta: u64) {
        self.inner.actions_dispatched.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_events_emitted(&self, delta: u64) {
        self.inner.events_emitted.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_status_changes(&self, delta: u64) {
        self.inner.status_changes.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_renders(&self, delta: u64) {
        self.inner.renders.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            ticks: self.inner.ticks.load(Ordering::Relaxed),
            actions_dispatched: self.inner.actions_dispatched.load(Ordering::Relaxed),
            events_emitted: self.inner.events_emitted.load(Ordering::Relaxed),
            status_changes: self.inner.status_changes.load(Ordering::Relaxed),
            renders: self.inner.renders.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatsSnapshot {
    pub ticks: u64,
    pub actions_dispatched: u64,
    pub events_emitted: u64,
    pub status_changes: u64,
    pub renders: u64,
}

impl StatsSnapshot {
    pub fn to_json_line(&self, label: &str, elapsed: Option<Duration>) -> String {
        #[derive(Serialize)]
        struct Line<'a> {
            label: &'a str,
            ticks: u64,
            actions_dispatched: u64,
            events_emitted: u64,
            status_changes: u64,
            renders: u64,
            elapsed_ms: Option<u128>,
        }

        let payload = Line {
            label,
            ticks: self.ticks,
            actions_dispatched: self.actions_dispatched,
            events_emitted: self.events_emitted,
            status_changes: self.status_changes,
            renders: self.renders,
            elapsed_ms: elapsed.map(|d| d.as_millis()),
        };
        serde_json::to_string(&payload).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct TickTimer {
    start: Instant,
}

impl TickTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

//! The application store: one shared source of truth, mutated only by
//! dispatching actions through the root reducer, which returns a new
//! immutable snapshot and recomputes derived metrics every call.

use std::sync::Arc;

use sf_core::checklist::Checklist;
use sf_core::{DerivedMetrics, DowntimeEntry, Event, Machine, TsMs};

pub mod actions;
pub mod metrics;
pub mod persist;
pub mod reducers;
pub mod selectors;
pub mod validate;

pub use actions::Action;
use persist::ChecklistStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("invalid downtime entry: {0}")]
    InvalidDowntime(String),

    #[error("checklist import rejected: {}", .0.join("; "))]
    ImportRejected(Vec<String>),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One immutable snapshot of everything the views read.
#[derive(Debug, Clone)]
pub struct AppState {
    pub machines: Arc<Vec<Machine>>,
    pub events: Arc<Vec<Event>>,
    pub downtime: Arc<Vec<DowntimeEntry>>,
    pub checklist: Checklist,
    pub metrics: DerivedMetrics,
}

impl AppState {
    pub fn new(
        machines: Vec<Machine>,
        events: Vec<Event>,
        downtime: Vec<DowntimeEntry>,
        checklist: Checklist,
        now_ms: TsMs,
    ) -> Self {
        let machines = Arc::new(machines);
        let events = Arc::new(events);
        let downtime = Arc::new(downtime);
        let metrics = metrics::calculate_metrics(&events, &machines, &downtime, now_ms);
        AppState { machines, events, downtime, checklist, metrics }
    }

    /// The synthetic dataset the demo boots from.
    pub fn seeded(now_ms: TsMs) -> Self {
        AppState::new(
            sf_core::seed::seed_machines(now_ms),
            sf_core::seed::seed_events(now_ms),
            sf_core::seed::seed_downtime(now_ms),
            Checklist::default(),
            now_ms,
        )
    }
}

/// Root reducer: composes every sub-reducer against the same action, then
/// recomputes the derived metrics unconditionally. Fine at tens of records;
/// it would not scale, and that tradeoff is deliberate.
pub fn reduce(state: &AppState, action: &Action, now_ms: TsMs) -> AppState {
    let machines = reducers::machines_reducer(&state.machines, action, now_ms);
    let events = reducers::events_reducer(&state.events, action, now_ms);
    let downtime = reducers::downtime_reducer(&state.downtime, action);
    let checklist = reducers::checklist_reducer(&state.checklist, action);
    let metrics = metrics::calculate_metrics(&events, &machines, &downtime, now_ms);
    AppState { machines, events, downtime, checklist, metrics }
}

pub type Clock = Box<dyn Fn() -> TsMs + Send>;

/// Wall clock in epoch millis.
pub fn system_clock() -> Clock {
    Box::new(|| chrono::Utc::now().timestamp_millis())
}

fn checklist_ptr_eq(a: &Checklist, b: &Checklist) -> bool {
    a.sections.len() == b.sections.len()
        && a.sections.iter().zip(b.sections.iter()).all(|((ka, va), (kb, vb))| {
            ka == kb && Arc::ptr_eq(va, vb)
        })
}

/// Owns the current snapshot and the single dispatch entry point. Every
/// dispatch runs to completion synchronously; checklist changes are
/// persisted as a full-document snapshot before dispatch returns.
pub struct Store {
    state: AppState,
    clock: Clock,
    checklist_store: Option<ChecklistStore>,
}

impl Store {
    pub fn new(state: AppState, clock: Clock) -> Self {
        Store { state, clock, checklist_store: None }
    }

    pub fn with_persistence(mut self, checklist_store: ChecklistStore) -> Self {
        self.checklist_store = Some(checklist_store);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        let now_ms = (self.clock)();
        let next = reduce(&self.state, &action, now_ms);
        let checklist_changed = !checklist_ptr_eq(&self.state.checklist, &next.checklist);
        self.state = next;
        if checklist_changed {
            if let Some(cs) = &self.checklist_store {
                cs.save(&self.state.checklist)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::checklist::Section;
    use sf_core::{MachineStatus, Severity};

    fn fixed_clock(now_ms: TsMs) -> Clock {
        Box::new(move || now_ms)
    }

    fn store_at(now_ms: TsMs) -> Store {
        Store::new(AppState::seeded(now_ms), fixed_clock(now_ms))
    }

    #[test]
    fn dispatch_replaces_the_snapshot_and_recomputes_metrics() {
        let now = 1_700_000_000_000;
        let mut store = store_at(now);
        let down_before = store.state().metrics.machines_down;

        store
            .dispatch(actions::set_machine_status(1, MachineStatus::Down))
            .unwrap();
        assert_eq!(store.state().metrics.machines_down, down_before + 1);

        store
            .dispatch(actions::add_event(1, Severity::Alarm, "CNC Mill 1 entered DOWN"))
            .unwrap();
        assert_eq!(store.state().events[0].message, "CNC Mill 1 entered DOWN");
        assert!(store.state().metrics.alarms_last_24h >= 1);
    }

    #[test]
    fn unrelated_dispatch_leaves_slices_pointer_shared() {
        let now = 1_700_000_000_000;
        let mut store = store_at(now);
        let events = Arc::clone(&store.state().events);
        store
            .dispatch(actions::toggle_checklist_item(Section::Safety, "Guards in place"))
            .unwrap();
        assert!(Arc::ptr_eq(&events, &store.state().events));
    }

    #[test]
    fn dispatch_persists_the_checklist_only_when_it_changes() {
        let dir = std::env::temp_dir().join(format!(
            "sf-store-dispatch-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let checklist_store = persist::ChecklistStore::new(&dir);
        let snapshot = checklist_store.path().to_path_buf();
        let _ = std::fs::remove_file(&snapshot);

        let now = 1_700_000_000_000;
        let mut store =
            Store::new(AppState::seeded(now), fixed_clock(now)).with_persistence(checklist_store.clone());

        // Unrelated dispatch: the snapshot is not written.
        store.dispatch(actions::acknowledge_event(3)).unwrap();
        assert!(!snapshot.exists());

        // Toggle: written, and the change is in the saved document.
        store
            .dispatch(actions::toggle_checklist_item(Section::Safety, "Guards in place"))
            .unwrap();
        assert!(snapshot.exists());
        let saved = checklist_store.load().unwrap();
        let guards = saved
            .section(Section::Safety)
            .unwrap()
            .iter()
            .find(|i| i.item == "Guards in place")
            .unwrap();
        assert!(guards.checked);

        // A later unrelated dispatch must not rewrite it.
        std::fs::remove_file(&snapshot).unwrap();
        store.dispatch(actions::acknowledge_event(2)).unwrap();
        assert!(!snapshot.exists());

        // A wholesale load writes it again.
        store
            .dispatch(Action::LoadChecklist { doc: Checklist::default() })
            .unwrap();
        assert!(snapshot.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn downtime_scenario_moves_todays_minutes_by_ten() {
        let now = chrono::Local::now().timestamp_millis();
        let mut store = Store::new(AppState::seeded(now), fixed_clock(now));
        let before = store.state().metrics.downtime_minutes_today;

        let t = metrics::local_day_start_ms(now) + 3_600_000;
        let action = actions::add_downtime(3, t, t + 600_000, sf_core::DowntimeReason::Setup, "die change")
            .unwrap();
        store.dispatch(action).unwrap();
        assert_eq!(store.state().metrics.downtime_minutes_today, before + 10);
    }
}

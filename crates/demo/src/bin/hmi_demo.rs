//! Simulated factory HMI demo: seeds a synthetic plant, runs the random-walk
//! simulation for a fixed number of ticks, interleaves user-like actions,
//! and renders each view to an HTML string. All data is fake.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use sf_core::checklist::{Checklist, Section};
use sf_core::{DowntimeReason, MS_PER_MINUTE};
use sf_runtime::init_tracing;
use sf_runtime::stats::{StatsRegistry, TickTimer};
use sf_sim::{SimConfig, Simulator};
use sf_store::persist::{parse_checklist, ChecklistStore};
use sf_store::{actions, selectors, system_clock, Action, AppState, Store, StoreError};
use sf_views::debounce::Debouncer;
use sf_views::{render, Route};

#[derive(Parser, Debug)]
#[command(name = "hmi_demo", about = "Simulated factory-machine status dashboard")]
struct Args {
    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 12)]
    ticks: u64,

    /// Delay between ticks in milliseconds (0 = run flat out).
    #[arg(long, default_value_t = 250)]
    interval_ms: u64,

    /// RNG seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the persisted checklist snapshot.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Import a checklist JSON document before the run starts.
    #[arg(long)]
    import: Option<PathBuf>,

    /// Export the final checklist document to this path.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write each rendered view under this directory instead of only logging.
    #[arg(long)]
    render_dir: Option<PathBuf>,
}

const SEARCH_KEYSTROKES: [&str; 4] = ["m", "mi", "mil", "mill"];

fn route_for_tick(tick: u64, state: &AppState) -> Route {
    let machine_id = state.machines.first().map_or(1, |m| m.id);
    match tick % 5 {
        0 => Route::Overview,
        1 => Route::Machine(machine_id),
        2 => Route::Runbooks,
        3 => Route::Commissioning,
        _ => Route::Help,
    }
}

fn import_checklist(store: &mut Store, path: &PathBuf) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading import file {}", path.display()))?;
    match parse_checklist(&text) {
        Ok(doc) => {
            store.dispatch(Action::LoadChecklist { doc })?;
            info!(path = %path.display(), "checklist imported");
        }
        Err(StoreError::ImportRejected(errors)) => {
            // Reject in full; the persisted document stays as it was.
            error!(path = %path.display(), "checklist import rejected:");
            for e in &errors {
                error!("  - {e}");
            }
        }
        Err(e) => error!(path = %path.display(), error = %e, "checklist import failed"),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(ticks = args.ticks, interval_ms = args.interval_ms, "hmi_demo starting");

    let checklist_store = ChecklistStore::new(&args.data_dir);
    let checklist = match checklist_store.load() {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "persisted checklist unreadable, falling back to default");
            Checklist::default()
        }
    };

    let now_ms = chrono::Utc::now().timestamp_millis();
    let state = AppState::new(
        sf_core::seed::seed_machines(now_ms),
        sf_core::seed::seed_events(now_ms),
        sf_core::seed::seed_downtime(now_ms),
        checklist,
        now_ms,
    );
    let mut store = Store::new(state, system_clock()).with_persistence(checklist_store.clone());

    if let Some(path) = &args.import {
        import_checklist(&mut store, path)?;
    }

    let mut sim = match args.seed {
        Some(seed) => Simulator::seeded(SimConfig::default(), seed),
        None => Simulator::new(SimConfig::default()),
    };
    let stats = StatsRegistry::default();
    let mut search = Debouncer::new(Duration::from_millis(300));

    if let Some(dir) = &args.render_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let run_timer = TickTimer::start();
    for tick in 0..args.ticks {
        let tick_timer = TickTimer::start();

        // Simulation tick: status rolls, events, throughput, heartbeat.
        let machines = Arc::clone(&store.state().machines);
        let sim_actions = sim.tick(&machines);
        for action in sim_actions {
            match &action {
                Action::AddEvent { .. } => stats.inc_events_emitted(1),
                Action::SetMachineStatus { .. } => stats.inc_status_changes(1),
                _ => {}
            }
            store.dispatch(action)?;
            stats.inc_actions_dispatched(1);
        }

        // User-like actions interleaved with the timer, as they would be in
        // the browser's event loop.
        if tick % 3 == 2 {
            let alarm_id = selectors::first_unacknowledged_alarm(&store.state().events).map(|e| e.id);
            if let Some(event_id) = alarm_id {
                store.dispatch(actions::acknowledge_event(event_id))?;
                stats.inc_actions_dispatched(1);
            }
        }
        if tick % 4 == 1 {
            let section = Section::ALL[(tick as usize / 4) % Section::ALL.len()];
            let item = store
                .state()
                .checklist
                .section(section)
                .and_then(|items| items.first())
                .map(|i| i.item.clone());
            if let Some(item) = item {
                store.dispatch(actions::toggle_checklist_item(section, item))?;
                stats.inc_actions_dispatched(1);
            }
        }
        if tick == args.ticks / 2 {
            let end_ms = chrono::Utc::now().timestamp_millis();
            match actions::add_downtime(
                3,
                end_ms - 10 * MS_PER_MINUTE,
                end_ms,
                DowntimeReason::Maintenance,
                "Scheduled lubrication",
            ) {
                Ok(action) => {
                    store.dispatch(action)?;
                    stats.inc_actions_dispatched(1);
                }
                Err(e) => warn!(error = %e, "downtime entry rejected"),
            }
        }

        // Debounced search: one keystroke per tick, fires after the quiet
        // period and filters the in-memory machine list.
        let now = Instant::now();
        if let Some(key) = SEARCH_KEYSTROKES.get(tick as usize) {
            search.submit((*key).to_string(), now);
        }
        if let Some(query) = search.poll(now) {
            let hits = selectors::search_machines(&store.state().machines, &query);
            info!(query = %query, hits = hits.len(), "debounced search");
        }

        let route = route_for_tick(tick, store.state());
        let html = render(route, store.state());
        stats.inc_renders(1);
        if let Some(dir) = &args.render_dir {
            let file = dir.join(format!("tick{tick:02}_{}.html", route.title().to_lowercase().replace(' ', "_")));
            fs::write(&file, &html).with_context(|| format!("writing {}", file.display()))?;
        }

        stats.inc_ticks(1);
        let metrics = store.state().metrics;
        let snap = stats.snapshot();
        info!(
            tick,
            duration_ms = tick_timer.elapsed().as_millis(),
            route = route.title(),
            html_bytes = html.len(),
            alarms_last_24h = metrics.alarms_last_24h,
            machines_down = metrics.machines_down,
            downtime_minutes_today = metrics.downtime_minutes_today,
            actions = snap.actions_dispatched,
            events = snap.events_emitted,
            "tick complete"
        );

        if args.interval_ms > 0 && tick + 1 < args.ticks {
            std::thread::sleep(Duration::from_millis(args.interval_ms));
        }
    }

    if let Some(path) = &args.export {
        checklist_store
            .export_to(&store.state().checklist, path)
            .with_context(|| format!("exporting checklist to {}", path.display()))?;
        info!(path = %path.display(), "checklist exported");
    }

    let summary = stats.snapshot().to_json_line("final", Some(run_timer.elapsed()));
    info!(%summary, "demo complete");
    Ok(())
}

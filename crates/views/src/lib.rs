//! View layer: pure functions from a state snapshot to an HTML string. The
//! host replaces its render target wholesale with whatever comes back.

use std::fmt::Write as _;

use chrono::{Local, TimeZone};
use tracing::warn;

use sf_core::checklist::Section;
use sf_core::runbook::default_runbooks;
use sf_core::{DowntimeEntry, Event, Machine, MachineId, TsMs};
use sf_store::{selectors, AppState};

pub mod debounce;
pub mod router;

pub use router::Route;

const MACHINE_EVENTS_SHOWN: usize = 10;
const OVERVIEW_EVENTS_SHOWN: usize = 8;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_ts(ts_ms: TsMs) -> String {
    match Local.timestamp_millis_opt(ts_ms).earliest() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("t+{ts_ms}ms"),
    }
}

pub fn render(route: Route, state: &AppState) -> String {
    match route {
        Route::Overview => render_overview(state),
        Route::Machine(id) => render_machine(state, id),
        Route::Runbooks => render_runbooks(),
        Route::Commissioning => render_commissioning(state),
        Route::Help => render_help(),
    }
}

fn status_badge(machine: &Machine) -> String {
    let status = machine.status.as_str();
    format!(r#"<span class="badge badge-{}">{}</span>"#, status.to_lowercase(), status)
}

fn event_row(event: &Event, machines: &[Machine]) -> String {
    let machine = selectors::machine_by_id(machines, event.machine_id)
        .map_or("unknown", |m| m.name.as_str());
    format!(
        r#"<tr class="sev-{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        event.severity.as_str().to_lowercase(),
        format_ts(event.ts_ms),
        event.severity.as_str(),
        escape_html(machine),
        escape_html(&event.message),
        if event.acknowledged { "ack" } else { "—" },
    )
}

pub fn render_overview(state: &AppState) -> String {
    let m = &state.metrics;
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<section class="metrics">
<div class="tile"><h3>Alarms (24h)</h3><p>{}</p></div>
<div class="tile"><h3>Machines down</h3><p>{}</p></div>
<div class="tile"><h3>Downtime today</h3><p>{} min</p></div>
</section>"#,
        m.alarms_last_24h, m.machines_down, m.downtime_minutes_today
    );

    html.push_str(r#"<section class="machines"><h2>Machines</h2><div class="grid">"#);
    for machine in state.machines.iter() {
        let _ = write!(
            html,
            r#"<a class="machine-card" href="{}">{}<h3>{}</h3><p>{:.1} u/min · health {}</p><p class="hb">hb {}</p></a>"#,
            Route::Machine(machine.id).fragment(),
            status_badge(machine),
            escape_html(&machine.name),
            machine.units_per_min,
            machine.health_score,
            format_ts(machine.last_heartbeat_ms),
        );
    }
    html.push_str("</div></section>");

    html.push_str(r#"<section class="events"><h2>Recent events</h2><table>"#);
    for event in state.events.iter().take(OVERVIEW_EVENTS_SHOWN) {
        html.push_str(&event_row(event, &state.machines));
    }
    html.push_str("</table></section>");
    html
}

pub fn render_machine(state: &AppState, id: MachineId) -> String {
    let Some(machine) = selectors::machine_by_id(&state.machines, id) else {
        // Missing render target: log and fall back rather than crash.
        warn!(machine_id = id, "machine not found, falling back to overview");
        return render_overview(state);
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r##"<section class="machine-detail"><a href="#/">&larr; Overview</a>
<h2>{} {}</h2>
<p>{:.1} units/min · health {} · last heartbeat {}</p>"##,
        escape_html(&machine.name),
        status_badge(machine),
        machine.units_per_min,
        machine.health_score,
        format_ts(machine.last_heartbeat_ms),
    );

    html.push_str("<h3>Events</h3><table>");
    for event in selectors::events_for_machine(&state.events, id, MACHINE_EVENTS_SHOWN) {
        html.push_str(&event_row(event, &state.machines));
    }
    html.push_str("</table>");

    html.push_str("<h3>Downtime</h3><table>");
    for entry in selectors::downtime_for_machine(&state.downtime, id) {
        html.push_str(&downtime_row(entry));
    }
    html.push_str("</table></section>");
    html
}

fn downtime_row(entry: &DowntimeEntry) -> String {
    let minutes = (entry.end_ms - entry.start_ms) / sf_core::MS_PER_MINUTE;
    format!(
        r#"<tr><td>{}</td><td>{}</td><td>{} min</td><td>{}</td><td>{}</td></tr>"#,
        format_ts(entry.start_ms),
        format_ts(entry.end_ms),
        minutes,
        entry.reason.as_str(),
        escape_html(&entry.notes),
    )
}

pub fn render_runbooks() -> String {
    let mut html = String::from(r#"<section class="runbooks"><h2>Runbooks</h2>"#);
    for rb in default_runbooks() {
        let _ = write!(
            html,
            r#"<article><h3>{}</h3><p class="applies">applies to: {}</p><ol>"#,
            escape_html(&rb.title),
            rb.applies_to.as_str(),
        );
        for step in &rb.steps {
            let _ = write!(html, "<li>{}</li>", escape_html(step));
        }
        html.push_str("</ol></article>");
    }
    html.push_str("</section>");
    html
}

pub fn render_commissioning(state: &AppState) -> String {
    let checklist = &state.checklist;
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<section class="commissioning"><h2>Commissioning checklist</h2><p class="overall">{}% complete</p>"#,
        selectors::overall_completion(checklist)
    );
    for section in Section::ALL {
        let _ = write!(
            html,
            r#"<article><h3>{} — {}%</h3><ul>"#,
            section.as_str(),
            selectors::section_completion(checklist, section)
        );
        if let Some(items) = checklist.section(section) {
            for item in items.iter() {
                let _ = write!(
                    html,
                    r#"<li><input type="checkbox"{}> {}</li>"#,
                    if item.checked { " checked" } else { "" },
                    escape_html(&item.item),
                );
            }
        }
        html.push_str("</ul></article>");
    }
    html.push_str("</section>");
    html
}

pub fn render_help() -> String {
    r#"<section class="help"><h2>Help</h2>
<p>This dashboard shows simulated machines only. Nothing here talks to real equipment.</p>
<ul>
<li><code>#/</code> — plant overview with derived metrics</li>
<li><code>#/machine/&lt;id&gt;</code> — one machine's events and downtime</li>
<li><code>#/runbooks</code> — operator runbooks</li>
<li><code>#/commissioning</code> — persisted commissioning checklist (import/export JSON)</li>
</ul></section>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::seeded(1_700_000_000_000)
    }

    #[test]
    fn overview_includes_metric_tiles_and_every_machine() {
        let state = state();
        let html = render_overview(&state);
        assert!(html.contains("Machines down"));
        for machine in state.machines.iter() {
            assert!(html.contains(&escape_html(&machine.name)));
        }
    }

    #[test]
    fn machine_detail_links_back_and_lists_its_downtime() {
        let state = state();
        let html = render_machine(&state, 5);
        assert!(html.contains("Paint Line"));
        assert!(html.contains("Failure"));
    }

    #[test]
    fn unknown_machine_falls_back_to_overview() {
        let state = state();
        assert_eq!(render_machine(&state, 999), render_overview(&state));
    }

    #[test]
    fn commissioning_lists_every_section_with_completion() {
        let html = render_commissioning(&state());
        for section in Section::ALL {
            assert!(html.contains(section.as_str()), "missing {}", section.as_str());
        }
        assert!(html.contains("0% complete"));
    }

    #[test]
    fn user_text_is_escaped() {
        assert_eq!(escape_html("<b>&\"x\"</b>"), "&lt;b&gt;&amp;&quot;x&quot;&lt;/b&gt;");
    }
}

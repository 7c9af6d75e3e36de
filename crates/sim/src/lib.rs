//! Simulation driver: a stateless, memoryless per-tick random walk over the
//! machine list. No smoothing and no correlation between ticks — this feeds
//! a demo dashboard, it is not a process model.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sf_core::{Machine, MachineStatus, Severity};
use sf_store::actions::Action;

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Per-machine, per-tick probability of a status roll.
    pub change_prob: f64,
    pub min_units_per_min: f64,
    pub max_units_per_min: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig { change_prob: 0.2, min_units_per_min: 0.0, max_units_per_min: 30.0 }
    }
}

const STATUSES: [MachineStatus; 3] =
    [MachineStatus::Run, MachineStatus::Idle, MachineStatus::Down];

pub struct Simulator {
    cfg: SimConfig,
    rng: StdRng,
}

impl Simulator {
    pub fn new(cfg: SimConfig) -> Self {
        Simulator { cfg, rng: StdRng::from_entropy() }
    }

    /// Seeded runs replay identically; used by the demo's `--seed` flag.
    pub fn seeded(cfg: SimConfig, seed: u64) -> Self {
        Simulator { cfg, rng: StdRng::seed_from_u64(seed) }
    }

    /// One tick: for each machine independently, maybe roll a new status
    /// (uniform over RUN/IDLE/DOWN); on an actual change, emit an event
    /// whose severity follows the new status. A roll that lands on the
    /// current status is a no-op. Every machine gets a fresh random
    /// throughput; a trailing heartbeat stamps the fleet.
    pub fn tick(&mut self, machines: &[Machine]) -> Vec<Action> {
        let mut actions = Vec::new();
        for machine in machines {
            if self.rng.gen_bool(self.cfg.change_prob) {
                let status = STATUSES[self.rng.gen_range(0..STATUSES.len())];
                if status != machine.status {
                    actions.push(Action::SetMachineStatus { machine_id: machine.id, status });
                    actions.push(Action::AddEvent {
                        machine_id: machine.id,
                        severity: Severity::for_status(status),
                        message: format!("{} entered {}", machine.name, status.as_str()),
                    });
                }
            }
            let units = self
                .rng
                .gen_range(self.cfg.min_units_per_min..=self.cfg.max_units_per_min);
            actions.push(Action::SetThroughput {
                machine_id: machine.id,
                units_per_min: (units * 10.0).round() / 10.0,
            });
        }
        actions.push(Action::Heartbeat);
        actions
    }
}

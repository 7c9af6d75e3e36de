//! Static operator runbooks shown on the runbooks view.

use serde::{Deserialize, Serialize};

use crate::MachineStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Runbook {
    pub title: String,
    pub applies_to: MachineStatus,
    pub steps: Vec<String>,
}

fn runbook(title: &str, applies_to: MachineStatus, steps: &[&str]) -> Runbook {
    Runbook {
        title: title.to_string(),
        applies_to,
        steps: steps.iter().map(|s| (*s).to_string()).collect(),
    }
}

pub fn default_runbooks() -> Vec<Runbook> {
    vec![
        runbook(
            "Machine down: first response",
            MachineStatus::Down,
            &[
                "Acknowledge the alarm on the overview screen",
                "Check the machine's local fault panel",
                "Record a downtime entry with the failure reason",
                "Escalate to maintenance if not restored in 15 minutes",
            ],
        ),
        runbook(
            "Extended idle investigation",
            MachineStatus::Idle,
            &[
                "Confirm upstream material supply",
                "Verify the operator station is staffed",
                "Check for a starved or blocked conveyor",
            ],
        ),
        runbook(
            "Throughput drift check",
            MachineStatus::Run,
            &[
                "Compare units/min against the rated speed",
                "Inspect recent WARN events for the machine",
                "Schedule a setup review if drift exceeds 10%",
            ],
        ),
    ]
}

use bs_core::{Progress, Scenario};
use serde::{Deserialize, Serialize};

use crate::scoring::{self, Grade};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SelectChoice,
    Undo,
    Reset,
}

/// Outward notification for the host, e.g. a gradebook update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEvent {
    Grade(Grade),
    Completion { completion: f64 },
}

pub fn events_after(
    operation: Operation,
    scenario: &Scenario,
    after: &Progress,
) -> Vec<EngineEvent> {
    let scoring_enabled = scenario.settings.enable_scoring;
    let grade = || EngineEvent::Grade(scoring::grade(scenario, after));
    let mut events = Vec::new();

    match operation {
        Operation::SelectChoice => {
            let reached_leaf = scenario
                .nodes
                .get(&after.current_node_id)
                .is_some_and(|node| node.is_leaf());
            if reached_leaf {
                if scoring_enabled {
                    events.push(grade());
                }
                events.push(EngineEvent::Completion { completion: 1.0 });
            }
        }
        Operation::Undo => {
            if scoring_enabled {
                events.push(grade());
            }
        }
        Operation::Reset => {
            if scoring_enabled {
                events.push(grade());
            }
            events.push(EngineEvent::Completion { completion: 0.0 });
        }
    }
    events
}

use serde::{Deserialize, Serialize};

use crate::types::Scenario;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub node_id: String,
    pub choice_index: usize,
    pub score_delta: i64,
}

/// One learner's position in a scenario.
///
/// `score` always equals the sum of `score_delta` over `history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current_node_id: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub score: i64,
}

impl Progress {
    pub fn start(scenario: &Scenario) -> Self {
        Self {
            current_node_id: scenario.start_node_id.clone(),
            history: Vec::new(),
            score: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// True when every node and choice this progress points at still exists in `scenario`.
    pub fn is_consistent_with(&self, scenario: &Scenario) -> bool {
        if !scenario.contains(&self.current_node_id) {
            return false;
        }
        self.history.iter().all(|entry| {
            scenario
                .nodes
                .get(&entry.node_id)
                .is_some_and(|node| entry.choice_index < node.choices.len())
        })
    }
}

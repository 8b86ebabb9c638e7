use bs_core::{HistoryEntry, Progress, Scenario};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub value: i64,
    pub max_value: f64,
}

/// Saturates instead of overflowing; navigation never lets a real sum get there.
pub fn accumulate(history: &[HistoryEntry]) -> i64 {
    history
        .iter()
        .fold(0i64, |total, entry| total.saturating_add(entry.score_delta))
}

/// Recomputes `score` from `history`. Stored scores are never trusted.
pub fn rebuild(mut progress: Progress) -> Progress {
    progress.score = accumulate(&progress.history);
    progress
}

pub fn is_consistent(progress: &Progress) -> bool {
    progress.score == accumulate(&progress.history)
}

pub fn grade(scenario: &Scenario, progress: &Progress) -> Grade {
    Grade {
        value: progress.score,
        max_value: scenario.settings.max_score,
    }
}

/// Score shown to the learner: only on a leaf, and only with scoring enabled.
pub fn visible_score(scenario: &Scenario, progress: &Progress) -> Option<i64> {
    if !scenario.settings.enable_scoring {
        return None;
    }
    let node = scenario.nodes.get(&progress.current_node_id)?;
    node.is_leaf().then_some(progress.score)
}

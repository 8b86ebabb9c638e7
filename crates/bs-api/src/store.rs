use std::collections::HashMap;

use bs_core::Progress;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Identifies one learner's progress in one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnerKey {
    pub scenario_id: String,
    pub learner_id: String,
}

impl LearnerKey {
    pub fn new(scenario_id: impl Into<String>, learner_id: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            learner_id: learner_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProgress {
    /// Scenario revision the progress was last written against.
    pub revision: u64,
    pub progress: Progress,
}

pub trait ProgressStore: Send + Sync {
    fn load(&self, key: &LearnerKey) -> Option<StoredProgress>;
    fn save(&self, key: &LearnerKey, progress: StoredProgress);
}

#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    entries: Mutex<HashMap<LearnerKey, StoredProgress>>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self, key: &LearnerKey) -> Option<StoredProgress> {
        self.entries.lock().get(key).cloned()
    }

    fn save(&self, key: &LearnerKey, progress: StoredProgress) {
        self.entries.lock().insert(key.clone(), progress);
    }
}

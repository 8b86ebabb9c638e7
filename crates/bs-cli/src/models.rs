use bs_api::StoredProgress;
use serde::{Deserialize, Serialize};

pub(crate) const PROGRESS_STATE_SCHEMA: &str = "progress-state.v1";

/// On-disk learner state between agent invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressStateV1 {
    pub(crate) schema_version: String,
    pub(crate) scenario_path: String,
    pub(crate) learner_id: String,
    pub(crate) stored: StoredProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewEvent {
    Active,
    Completed,
}

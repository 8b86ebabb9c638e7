//! Host-side facade over the scenario engine: one scenario, many learners.

mod config;
mod events;
mod handlers;
mod host;
mod locks;
mod store;

pub use config::{HostConfig, DEFAULT_LOG_FILTER, DEFAULT_STATE_DIR};
pub use events::{EventSink, NoopEventSink, RecordingEventSink};
pub use handlers::{failure_json, outcome_json, success_json, HANDLER_NAMES};
pub use host::{ScenarioHost, ScenarioHostOptions};
pub use store::{LearnerKey, MemoryProgressStore, ProgressStore, StoredProgress};

pub use bs_authoring::{AuthoringLimits, SaveOutcome, ScenarioDraft};
pub use bs_core::{ErrorKind, Progress, Scenario, ScenarioError, ViewState};
pub use bs_runtime::EngineEvent;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use bs_core::{Progress, Scenario, ScenarioError, ViewState};

use crate::events::{events_after, EngineEvent, Operation};
use crate::{navigation, scoring, view};

/// A learner's progress bound to the scenario version it was started against.
#[derive(Debug, Clone)]
pub struct LearnerSession {
    scenario: Arc<Scenario>,
    progress: Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resumed {
    Kept,
    Reinitialized,
}

impl LearnerSession {
    pub fn start(scenario: Arc<Scenario>) -> Self {
        let progress = Progress::start(&scenario);
        Self { scenario, progress }
    }

    /// Resumes stored progress. Progress that points at nodes or choices the
    /// scenario no longer has is discarded, never repaired.
    pub fn resume(scenario: Arc<Scenario>, progress: Progress) -> (Self, Resumed) {
        if progress.is_consistent_with(&scenario) {
            let progress = scoring::rebuild(progress);
            return (Self { scenario, progress }, Resumed::Kept);
        }
        tracing::warn!(
            current = %progress.current_node_id,
            revision = scenario.revision,
            "stale progress discarded"
        );
        (Self::start(scenario), Resumed::Reinitialized)
    }

    pub fn scenario(&self) -> &Arc<Scenario> {
        &self.scenario
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn into_progress(self) -> Progress {
        self.progress
    }

    pub fn view(&self) -> Result<ViewState, ScenarioError> {
        view::current_view(&self.scenario, &self.progress)
    }

    pub fn select_choice(&mut self, index: usize) -> Result<Vec<EngineEvent>, ScenarioError> {
        self.apply(Operation::SelectChoice, |scenario, progress| {
            navigation::select_choice(scenario, progress, index)
        })
    }

    pub fn undo(&mut self) -> Result<Vec<EngineEvent>, ScenarioError> {
        self.apply(Operation::Undo, navigation::undo)
    }

    pub fn reset_activity(&mut self) -> Result<Vec<EngineEvent>, ScenarioError> {
        self.apply(Operation::Reset, navigation::reset_activity)
    }

    fn apply(
        &mut self,
        operation: Operation,
        transition: impl FnOnce(&Scenario, &Progress) -> Result<Progress, ScenarioError>,
    ) -> Result<Vec<EngineEvent>, ScenarioError> {
        let next = transition(&self.scenario, &self.progress)?;
        debug_assert!(scoring::is_consistent(&next));
        let events = events_after(operation, &self.scenario, &next);
        self.progress = next;
        Ok(events)
    }
}

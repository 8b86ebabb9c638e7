use std::sync::Arc;

use bs_authoring::{build_scenario, AuthoringLimits, SaveOutcome, ScenarioDraft};
use bs_core::{Scenario, ScenarioError, ViewState};
use bs_runtime::{EngineEvent, LearnerSession, Resumed};
use parking_lot::RwLock;

use crate::events::{EventSink, NoopEventSink};
use crate::locks::LearnerLocks;
use crate::store::{LearnerKey, MemoryProgressStore, ProgressStore, StoredProgress};

#[derive(Clone)]
pub struct ScenarioHostOptions {
    pub scenario_id: String,
    pub scenario: Scenario,
    pub progress_store: Option<Arc<dyn ProgressStore>>,
    pub event_sink: Option<Arc<dyn EventSink>>,
    pub limits: Option<AuthoringLimits>,
}

/// Serves one scenario to many learners.
///
/// The scenario is swapped wholesale on save; each operation works against
/// the version it read at its start. Mutations for the same learner are
/// serialized, different learners share no lock.
pub struct ScenarioHost {
    scenario_id: String,
    scenario: RwLock<Arc<Scenario>>,
    store: Arc<dyn ProgressStore>,
    events: Arc<dyn EventSink>,
    limits: AuthoringLimits,
    locks: LearnerLocks,
}

impl ScenarioHost {
    pub fn new(options: ScenarioHostOptions) -> Self {
        Self {
            scenario_id: options.scenario_id,
            scenario: RwLock::new(Arc::new(options.scenario)),
            store: options
                .progress_store
                .unwrap_or_else(|| Arc::new(MemoryProgressStore::new())),
            events: options.event_sink.unwrap_or_else(|| Arc::new(NoopEventSink)),
            limits: options.limits.unwrap_or_default(),
            locks: LearnerLocks::default(),
        }
    }

    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    pub fn scenario(&self) -> Arc<Scenario> {
        self.scenario.read().clone()
    }

    pub fn key(&self, learner_id: &str) -> LearnerKey {
        LearnerKey::new(self.scenario_id.clone(), learner_id)
    }

    pub fn get_current_state(&self, learner_id: &str) -> Result<ViewState, ScenarioError> {
        self.with_session(learner_id, |_| Ok(Vec::new()))
    }

    pub fn select_choice(
        &self,
        learner_id: &str,
        choice_index: usize,
    ) -> Result<ViewState, ScenarioError> {
        self.with_session(learner_id, |session| session.select_choice(choice_index))
    }

    pub fn undo_choice(&self, learner_id: &str) -> Result<ViewState, ScenarioError> {
        self.with_session(learner_id, LearnerSession::undo)
    }

    pub fn reset_activity(&self, learner_id: &str) -> Result<ViewState, ScenarioError> {
        self.with_session(learner_id, LearnerSession::reset_activity)
    }

    /// Validates `draft` and, only if it passes, replaces the stored scenario.
    pub fn save_scenario(&self, draft: &ScenarioDraft) -> SaveOutcome {
        let mut current = self.scenario.write();
        match build_scenario(draft, &current, &self.limits) {
            Ok(next) => {
                tracing::info!(
                    scenario = %self.scenario_id,
                    revision = next.revision,
                    nodes = next.len(),
                    "scenario saved"
                );
                *current = Arc::new(next);
                SaveOutcome::saved()
            }
            Err(errors) => {
                tracing::warn!(
                    scenario = %self.scenario_id,
                    errors = errors.len(),
                    first = ?errors.first().map(ScenarioError::code),
                    "scenario rejected"
                );
                SaveOutcome::rejected(&errors)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn lock_count(&self) -> usize {
        self.locks.len()
    }

    fn with_session(
        &self,
        learner_id: &str,
        operation: impl FnOnce(&mut LearnerSession) -> Result<Vec<EngineEvent>, ScenarioError>,
    ) -> Result<ViewState, ScenarioError> {
        let key = self.key(learner_id);
        let lock = self.locks.for_key(&key);
        let result = {
            let _guard = lock.lock();
            self.run_locked(&key, learner_id, operation)
        };
        drop(lock);
        self.locks.release(&key);
        result
    }

    fn run_locked(
        &self,
        key: &LearnerKey,
        learner_id: &str,
        operation: impl FnOnce(&mut LearnerSession) -> Result<Vec<EngineEvent>, ScenarioError>,
    ) -> Result<ViewState, ScenarioError> {
        let scenario = self.scenario();
        let (mut session, resumed) = self.load_session(key, scenario);
        let events = operation(&mut session)?;
        let view = session.view()?;

        let revision = session.scenario().revision;
        self.store.save(
            key,
            StoredProgress {
                revision,
                progress: session.into_progress(),
            },
        );
        if resumed == Resumed::Reinitialized {
            tracing::info!(learner = %learner_id, revision, "progress reinitialized");
        }
        for event in &events {
            tracing::debug!(learner = %learner_id, ?event, "event published");
            self.events.publish(key, event);
        }
        Ok(view)
    }

    fn load_session(
        &self,
        key: &LearnerKey,
        scenario: Arc<Scenario>,
    ) -> (LearnerSession, Resumed) {
        match self.store.load(key) {
            Some(stored) => LearnerSession::resume(scenario, stored.progress),
            None => (LearnerSession::start(scenario), Resumed::Kept),
        }
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bs_api::{
    EngineEvent, HostConfig, LearnerKey, MemoryProgressStore, ProgressStore, RecordingEventSink,
    Scenario, ScenarioError, ScenarioHost, ScenarioHostOptions, StoredProgress, ViewState,
};

use crate::{
    emit_view, load_progress_state, load_scenario, save_progress_state, AgentArgs, AgentCommand,
    ChooseArgs, CliError, ProgressStateV1, StartArgs, StateArgs, TransitionArgs,
    PROGRESS_STATE_SCHEMA,
};

/// A host wired to in-memory collaborators for a single invocation.
pub(crate) struct AgentHost {
    pub(crate) host: ScenarioHost,
    pub(crate) store: Arc<MemoryProgressStore>,
    pub(crate) sink: Arc<RecordingEventSink>,
    pub(crate) scenario_path: String,
}

impl AgentHost {
    pub(crate) fn new(scenario_path: &str, scenario: Scenario, config: &HostConfig) -> Self {
        let store = Arc::new(MemoryProgressStore::new());
        let sink = Arc::new(RecordingEventSink::new());
        let host = ScenarioHost::new(ScenarioHostOptions {
            scenario_id: scenario_path.to_string(),
            scenario,
            progress_store: Some(store.clone()),
            event_sink: Some(sink.clone()),
            limits: Some(config.limits()),
        });
        Self {
            host,
            store,
            sink,
            scenario_path: scenario_path.to_string(),
        }
    }

    pub(crate) fn seed(&self, learner_id: &str, stored: StoredProgress) {
        self.store.save(&self.key(learner_id), stored);
    }

    pub(crate) fn key(&self, learner_id: &str) -> LearnerKey {
        LearnerKey::new(self.scenario_path.clone(), learner_id)
    }

    /// Events published during this invocation, in order.
    pub(crate) fn drain_events(&self) -> Vec<EngineEvent> {
        self.sink.take().into_iter().map(|(_, event)| event).collect()
    }

    pub(crate) fn persist(&self, learner_id: &str, path: &Path) -> Result<(), CliError> {
        let Some(stored) = self.store.load(&self.key(learner_id)) else {
            return Err(CliError::new(
                "CLI_STATE_MISSING",
                format!("No progress recorded for learner {}", learner_id),
            ));
        };
        save_progress_state(
            path,
            &ProgressStateV1 {
                schema_version: PROGRESS_STATE_SCHEMA.to_string(),
                scenario_path: self.scenario_path.clone(),
                learner_id: learner_id.to_string(),
                stored,
            },
        )
    }
}

pub(crate) fn default_state_path(config: &HostConfig, learner_id: &str) -> PathBuf {
    Path::new(&config.state_dir).join(format!("{}.json", learner_id))
}

pub(super) fn run_agent(args: AgentArgs, config: &HostConfig) -> Result<i32, CliError> {
    match args.command {
        AgentCommand::Start(args) => run_start(args, config),
        AgentCommand::Choose(args) => run_choose(args, config),
        AgentCommand::Undo(args) => {
            run_state_transition(&args, config, |host, learner| host.undo_choice(learner))
        }
        AgentCommand::Reset(args) => {
            run_state_transition(&args, config, |host, learner| host.reset_activity(learner))
        }
        AgentCommand::State(args) => run_state(args, config),
    }
}

pub(super) fn run_start(args: StartArgs, config: &HostConfig) -> Result<i32, CliError> {
    let scenario = load_scenario(Path::new(&args.scenario), &config.limits())?;
    let agent = AgentHost::new(&args.scenario, scenario, config);
    let view = agent.host.get_current_state(&args.learner)?;

    let state_out = args
        .state_out
        .map(PathBuf::from)
        .unwrap_or_else(|| default_state_path(config, &args.learner));
    agent.persist(&args.learner, &state_out)?;
    let state_out = state_out.to_string_lossy();
    emit_view(&view, &agent.drain_events(), Some(state_out.as_ref()))?;
    Ok(0)
}

pub(super) fn run_choose(args: ChooseArgs, config: &HostConfig) -> Result<i32, CliError> {
    let transition = TransitionArgs {
        state_in: args.state_in,
        state_out: args.state_out,
    };
    run_state_transition(&transition, config, |host, learner| {
        host.select_choice(learner, args.choice)
    })
}

pub(super) fn run_state(args: StateArgs, config: &HostConfig) -> Result<i32, CliError> {
    let (agent, learner_id) = load_agent_for_state(Path::new(&args.state_in), config)?;
    let view = agent.host.get_current_state(&learner_id)?;
    emit_view(&view, &agent.drain_events(), None)?;
    Ok(0)
}

pub(crate) fn load_agent_for_state(
    state_in: &Path,
    config: &HostConfig,
) -> Result<(AgentHost, String), CliError> {
    let state = load_progress_state(state_in)?;
    let scenario = load_scenario(Path::new(&state.scenario_path), &config.limits())?;
    if state.stored.revision != scenario.revision {
        tracing::info!(
            stored = state.stored.revision,
            current = scenario.revision,
            "state was taken against another scenario revision"
        );
    }
    let agent = AgentHost::new(&state.scenario_path, scenario, config);
    agent.seed(&state.learner_id, state.stored);
    Ok((agent, state.learner_id))
}

fn run_state_transition(
    args: &TransitionArgs,
    config: &HostConfig,
    transition: impl FnOnce(&ScenarioHost, &str) -> Result<ViewState, ScenarioError>,
) -> Result<i32, CliError> {
    let (agent, learner_id) = load_agent_for_state(Path::new(&args.state_in), config)?;
    let view = transition(&agent.host, &learner_id)?;
    agent.persist(&learner_id, Path::new(&args.state_out))?;
    emit_view(&view, &agent.drain_events(), Some(args.state_out.as_str()))?;
    Ok(0)
}

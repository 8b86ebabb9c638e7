use std::fs;
use std::path::Path;

use bs_authoring::{validate_scenario, AuthoringLimits, ScenarioDraft};
use bs_core::Scenario;

use crate::{
    map_cli_draft_invalid, map_cli_draft_read, map_cli_scenario_invalid, map_cli_scenario_read,
    map_cli_scenario_write, map_cli_serialize, map_cli_state_invalid, map_cli_state_read,
    map_cli_state_write, CliError, ProgressStateV1, PROGRESS_STATE_SCHEMA,
};

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

pub(crate) fn save_progress_state(path: &Path, state: &ProgressStateV1) -> Result<(), CliError> {
    ensure_parent(path).map_err(map_cli_state_write)?;
    let payload = serde_json::to_string(state).map_err(map_cli_serialize)?;
    fs::write(path, payload).map_err(map_cli_state_write)
}

pub(crate) fn load_progress_state(path: &Path) -> Result<ProgressStateV1, CliError> {
    if !path.exists() {
        return Err(CliError::new(
            "CLI_STATE_NOT_FOUND",
            format!("State file does not exist: {}", path.display()),
        ));
    }

    let raw = fs::read_to_string(path).map_err(map_cli_state_read)?;
    let state: ProgressStateV1 = serde_json::from_str(&raw).map_err(map_cli_state_invalid)?;

    if state.schema_version != PROGRESS_STATE_SCHEMA {
        return Err(CliError::new(
            "CLI_STATE_SCHEMA",
            format!("Unsupported progress state schema: {}", state.schema_version),
        ));
    }

    Ok(state)
}

/// Reads a scenario file and checks its integrity before any learner uses it.
pub(crate) fn load_scenario(path: &Path, limits: &AuthoringLimits) -> Result<Scenario, CliError> {
    if !path.exists() {
        return Err(CliError::new(
            "CLI_SCENARIO_NOT_FOUND",
            format!("Scenario file does not exist: {}", path.display()),
        ));
    }
    let raw = fs::read_to_string(path).map_err(map_cli_scenario_read)?;
    let scenario: Scenario = serde_json::from_str(&raw).map_err(map_cli_scenario_invalid)?;
    validate_scenario(&scenario, limits)?;
    Ok(scenario)
}

pub(crate) fn save_scenario_file(path: &Path, scenario: &Scenario) -> Result<(), CliError> {
    ensure_parent(path).map_err(map_cli_scenario_write)?;
    let payload = serde_json::to_string_pretty(scenario).map_err(map_cli_serialize)?;
    fs::write(path, payload).map_err(map_cli_scenario_write)
}

pub(crate) fn load_draft(path: &Path) -> Result<ScenarioDraft, CliError> {
    let raw = fs::read_to_string(path).map_err(map_cli_draft_read)?;
    serde_json::from_str(&raw).map_err(map_cli_draft_invalid)
}

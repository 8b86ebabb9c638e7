//! Authoring path: stage a submitted draft, validate it, and produce the
//! next scenario version.

mod draft;
mod staging;
mod validator;

use std::collections::BTreeMap;

use bs_core::{Scenario, ScenarioError, Settings};
use serde::{Deserialize, Serialize};

pub use draft::{ChoiceDraft, NodeDraft, ScenarioDraft, SettingsDraft};
pub use staging::{
    coerce_score, fresh_node_id, merge_settings, stage, StagedScenario, MAX_CHOICE_SCORE,
    MIN_CHOICE_SCORE, TEMP_ID_PREFIX,
};
pub use validator::{
    check_node_count, validate_nodes, validate_scenario, AuthoringLimits, MAX_NODES,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl SaveOutcome {
    pub fn saved() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn rejected(errors: &[ScenarioError]) -> Self {
        let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in errors {
            field_errors
                .entry(error.field.clone().unwrap_or_else(|| "nodes".to_string()))
                .or_default()
                .push(error.message.clone());
        }
        Self {
            success: false,
            errors: errors.iter().map(|error| error.message.clone()).collect(),
            field_errors,
        }
    }
}

/// Builds the next scenario from `draft`. `previous` supplies settings the
/// draft leaves out and the revision to advance from; it is never modified.
pub fn build_scenario(
    draft: &ScenarioDraft,
    previous: &Scenario,
    limits: &AuthoringLimits,
) -> Result<Scenario, Vec<ScenarioError>> {
    check_node_count(draft.nodes.len(), limits).map_err(|error| vec![error])?;

    let StagedScenario {
        nodes,
        positions,
        settings,
    } = stage(draft, &previous.settings)?;

    let start_node_id = nodes.first().map(|node| node.id.clone());
    validate_nodes(&nodes, start_node_id.as_deref(), limits)
        .map_err(|error| vec![with_draft_position(error, &positions)])?;

    let mut scenario = Scenario::from_nodes(nodes, start_node_id.unwrap_or_default(), settings);
    scenario.revision = previous.revision + 1;
    Ok(scenario)
}

/// An empty scenario to author against when nothing has been saved yet.
pub fn empty_scenario(settings: Settings) -> Scenario {
    Scenario::from_nodes(Vec::new(), String::new(), settings)
}

/// Rewrites a staged `nodes[i]` field prefix to the draft index it came from.
fn with_draft_position(mut error: ScenarioError, positions: &[usize]) -> ScenarioError {
    let Some(field) = error.field.as_deref() else {
        return error;
    };
    let Some(rest) = field.strip_prefix("nodes[") else {
        return error;
    };
    let Some((index, tail)) = rest.split_once(']') else {
        return error;
    };
    if let Some(position) = index.parse::<usize>().ok().and_then(|i| positions.get(i)) {
        error.field = Some(format!("nodes[{}]{}", position, tail));
    }
    error
}

#[cfg(test)]
mod tests;

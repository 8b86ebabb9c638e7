use bs_core::{ErrorKind, HistoryEntry, Progress, Scenario, ScenarioError};

/// Where a learner stands. A leaf is `Completed`, but undo and reset can leave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationState {
    Active(String),
    Completed(String),
}

pub fn state_of(
    scenario: &Scenario,
    progress: &Progress,
) -> Result<NavigationState, ScenarioError> {
    let node = scenario.node(&progress.current_node_id)?;
    Ok(if node.is_leaf() {
        NavigationState::Completed(node.id.clone())
    } else {
        NavigationState::Active(node.id.clone())
    })
}

pub fn select_choice(
    scenario: &Scenario,
    progress: &Progress,
    index: usize,
) -> Result<Progress, ScenarioError> {
    let node = scenario.node(&progress.current_node_id)?;
    if node.is_leaf() {
        return Err(ScenarioError::new(
            ErrorKind::InvalidChoice,
            format!("Node \"{}\" is a leaf and has no choices.", node.id),
        ));
    }
    let Some(choice) = node.choice(index) else {
        return Err(ScenarioError::new(
            ErrorKind::InvalidChoice,
            format!(
                "Choice index {} is out of range for node \"{}\" ({} choices).",
                index,
                node.id,
                node.choices.len()
            ),
        ));
    };
    let target = scenario.node(&choice.target_node_id)?;
    let Some(score) = progress.score.checked_add(choice.score) else {
        return Err(ScenarioError::new(
            ErrorKind::InvalidChoice,
            format!(
                "Choice {} of node \"{}\" would overflow the score.",
                index, node.id
            ),
        ));
    };

    let mut next = progress.clone();
    next.history.push(HistoryEntry {
        node_id: node.id.clone(),
        choice_index: index,
        score_delta: choice.score,
    });
    next.current_node_id = target.id.clone();
    next.score = score;

    tracing::debug!(
        from = %node.id,
        to = %target.id,
        choice = index,
        delta = choice.score,
        score = next.score,
        "choice applied"
    );
    Ok(next)
}

pub fn undo(scenario: &Scenario, progress: &Progress) -> Result<Progress, ScenarioError> {
    if !scenario.settings.enable_undo {
        return Err(ScenarioError::new(
            ErrorKind::UndoUnavailable,
            "Undo is not enabled for this scenario.",
        ));
    }
    let mut next = progress.clone();
    let Some(entry) = next.history.pop() else {
        return Err(ScenarioError::new(
            ErrorKind::UndoUnavailable,
            "There is no choice to undo.",
        ));
    };
    let Some(score) = next.score.checked_sub(entry.score_delta) else {
        return Err(ScenarioError::new(
            ErrorKind::UndoUnavailable,
            "The recorded score cannot be undone.",
        ));
    };
    next.current_node_id = entry.node_id;
    next.score = score;

    tracing::debug!(
        to = %next.current_node_id,
        delta = entry.score_delta,
        score = next.score,
        "choice undone"
    );
    Ok(next)
}

pub fn reset_activity(scenario: &Scenario, progress: &Progress) -> Result<Progress, ScenarioError> {
    if !scenario.settings.enable_reset_activity {
        return Err(ScenarioError::new(
            ErrorKind::ResetUnavailable,
            "Reset is not enabled for this scenario.",
        ));
    }
    tracing::debug!(
        from = %progress.current_node_id,
        depth = progress.depth(),
        "activity reset"
    );
    Ok(Progress::start(scenario))
}

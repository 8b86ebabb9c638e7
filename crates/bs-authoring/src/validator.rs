use std::collections::HashSet;

use bs_core::{Node, Scenario, ScenarioError, ValidationKind};

use crate::staging::{MAX_CHOICE_SCORE, MIN_CHOICE_SCORE};

pub const MAX_NODES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthoringLimits {
    pub max_nodes: usize,
}

impl Default for AuthoringLimits {
    fn default() -> Self {
        Self {
            max_nodes: MAX_NODES,
        }
    }
}

pub fn check_node_count(count: usize, limits: &AuthoringLimits) -> Result<(), ScenarioError> {
    if count > limits.max_nodes {
        return Err(ScenarioError::validation(
            ValidationKind::TooManyNodes,
            format!("Too many nodes (max {}).", limits.max_nodes),
            "nodes",
        ));
    }
    Ok(())
}

/// Checks a submitted node set and stops at the first violation.
///
/// Cycles and nodes unreachable from the start node are accepted.
pub fn validate_nodes(
    nodes: &[Node],
    start_node_id: Option<&str>,
    limits: &AuthoringLimits,
) -> Result<(), ScenarioError> {
    let mut ids = HashSet::new();
    for (position, node) in nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            return Err(ScenarioError::validation(
                ValidationKind::EmptyId,
                format!("Node at position {} has an empty id", position),
                format!("nodes[{}].id", position),
            ));
        }
        if !ids.insert(node.id.as_str()) {
            return Err(ScenarioError::validation(
                ValidationKind::DuplicateId,
                format!("Duplicate node id {}", node.id),
                format!("nodes[{}].id", position),
            ));
        }
    }

    for (position, node) in nodes.iter().enumerate() {
        for (choice_position, choice) in node.choices.iter().enumerate() {
            if !ids.contains(choice.target_node_id.as_str()) {
                return Err(ScenarioError::validation(
                    ValidationKind::DanglingTarget,
                    format!(
                        "Invalid target {} in node {}",
                        choice.target_node_id, node.id
                    ),
                    format!(
                        "nodes[{}].choices[{}].target_node_id",
                        position, choice_position
                    ),
                ));
            }
        }
    }

    match start_node_id {
        None if nodes.is_empty() => {
            return Err(ScenarioError::validation(
                ValidationKind::MissingStartNode,
                "At least one node is required",
                "nodes",
            ))
        }
        Some(start) if ids.contains(start) => {}
        _ => {
            return Err(ScenarioError::validation(
                ValidationKind::MissingStartNode,
                "Start node ID does not exist",
                "start_node_id",
            ))
        }
    }

    check_node_count(nodes.len(), limits)
}

/// Validates an already assembled scenario, e.g. one read back from storage.
pub fn validate_scenario(
    scenario: &Scenario,
    limits: &AuthoringLimits,
) -> Result<(), ScenarioError> {
    for (position, (key, node)) in scenario.nodes.iter().enumerate() {
        if key != &node.id {
            return Err(ScenarioError::validation(
                ValidationKind::DuplicateId,
                format!("Node stored under {} declares id {}", key, node.id),
                format!("nodes[{}].id", position),
            ));
        }
        let scores = node.choices.iter().map(|choice| choice.score).enumerate();
        for (choice_position, score) in scores {
            if !(MIN_CHOICE_SCORE..=MAX_CHOICE_SCORE).contains(&score) {
                return Err(ScenarioError::validation(
                    ValidationKind::InvalidScore,
                    format!(
                        "Choice score must be an integer between {} and {} in node {}.",
                        MIN_CHOICE_SCORE, MAX_CHOICE_SCORE, node.id
                    ),
                    format!("nodes[{}].choices[{}].score", position, choice_position),
                ));
            }
        }
    }
    let nodes = scenario.nodes.values().cloned().collect::<Vec<_>>();
    validate_nodes(&nodes, Some(&scenario.start_node_id), limits)
}

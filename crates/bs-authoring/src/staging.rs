use std::collections::HashMap;

use bs_core::{Choice, Media, Node, ScenarioError, Settings, ValidationKind};
use serde_json::Value;

use crate::draft::{ChoiceDraft, NodeDraft, ScenarioDraft, SettingsDraft};

pub const TEMP_ID_PREFIX: &str = "temp-";
pub const MIN_CHOICE_SCORE: i64 = 0;
pub const MAX_CHOICE_SCORE: i64 = 100;

/// Draft nodes after id assignment and cleanup, in authoring order.
#[derive(Debug, Clone)]
pub struct StagedScenario {
    pub nodes: Vec<Node>,
    /// Draft index each staged node came from.
    pub positions: Vec<usize>,
    pub settings: Settings,
}

pub fn fresh_node_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("node-{}", &hex[..6])
}

pub fn coerce_score(raw: &Value) -> Option<i64> {
    let score = match raw {
        Value::Number(number) => match number.as_i64() {
            Some(value) => value,
            None => {
                let value = number.as_f64()?;
                if value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
                    return None;
                }
                value as i64
            }
        },
        Value::String(text) => {
            let text = text.trim();
            let digits = text.strip_prefix('-').unwrap_or(text);
            if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
                return None;
            }
            text.parse::<i64>().ok()?
        }
        _ => return None,
    };
    (MIN_CHOICE_SCORE..=MAX_CHOICE_SCORE)
        .contains(&score)
        .then_some(score)
}

pub fn merge_settings(previous: &Settings, draft: &SettingsDraft) -> Settings {
    let trimmed = |value: &Option<String>| value.as_deref().unwrap_or("").trim().to_string();
    Settings {
        enable_undo: draft.enable_undo.unwrap_or(previous.enable_undo),
        enable_scoring: draft.enable_scoring.unwrap_or(previous.enable_scoring),
        enable_hints: draft.enable_hints.unwrap_or(previous.enable_hints),
        enable_reset_activity: draft
            .enable_reset_activity
            .unwrap_or(previous.enable_reset_activity),
        max_score: draft.max_score.unwrap_or(previous.max_score),
        display_name: draft
            .display_name
            .clone()
            .unwrap_or_else(|| previous.display_name.clone()),
        background_image_url: trimmed(&draft.background_image_url),
        background_image_alt_text: trimmed(&draft.background_image_alt_text),
        background_image_is_decorative: draft.background_image_is_decorative.unwrap_or(false),
    }
}

pub fn check_background(settings: &Settings) -> Result<(), ScenarioError> {
    if !settings.background_image_url.is_empty()
        && !settings.background_image_is_decorative
        && settings.background_image_alt_text.is_empty()
    {
        return Err(ScenarioError::validation(
            ValidationKind::MissingAltText,
            "Background image alt text is required unless the image is marked decorative.",
            "background_image_alt_text",
        ));
    }
    Ok(())
}

fn is_temporary(id: &str) -> bool {
    id.is_empty() || id.starts_with(TEMP_ID_PREFIX)
}

fn is_blank_choice(choice: &ChoiceDraft) -> bool {
    choice.text.trim().is_empty() && choice.target_node_id.trim().is_empty()
}

fn is_blank_node(node: &NodeDraft) -> bool {
    node.content.trim().is_empty()
        && node.media.url.trim().is_empty()
        && node.choices.iter().all(is_blank_choice)
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Assigns permanent ids, drops blank nodes and choices, remaps temp targets
/// and coerces scores. Score errors are collected rather than short-circuited.
pub fn stage(
    draft: &ScenarioDraft,
    previous: &Settings,
) -> Result<StagedScenario, Vec<ScenarioError>> {
    let settings = merge_settings(previous, &draft.settings);
    check_background(&settings).map_err(|error| vec![error])?;

    let mut id_map = HashMap::new();
    let assigned = draft
        .nodes
        .iter()
        .map(|node| {
            let id = if is_temporary(&node.id) {
                fresh_node_id()
            } else {
                node.id.clone()
            };
            id_map.insert(node.id.clone(), id.clone());
            id
        })
        .collect::<Vec<_>>();

    let mut nodes = Vec::new();
    let mut positions = Vec::new();
    let mut errors = Vec::new();

    for (position, (raw, id)) in draft.nodes.iter().zip(assigned).enumerate() {
        if is_blank_node(raw) {
            tracing::debug!(position, "blank draft node dropped");
            continue;
        }

        let mut choices = Vec::new();
        for (choice_position, choice) in raw.choices.iter().enumerate() {
            if is_blank_choice(choice) {
                continue;
            }
            let Some(score) = coerce_score(&choice.score) else {
                errors.push(ScenarioError::validation(
                    ValidationKind::InvalidScore,
                    format!(
                        "Choice score must be an integer between {} and {} in node {}.",
                        MIN_CHOICE_SCORE, MAX_CHOICE_SCORE, id
                    ),
                    format!("nodes[{}].choices[{}].score", position, choice_position),
                ));
                continue;
            };
            let target = choice.target_node_id.trim();
            choices.push(Choice {
                text: choice.text.trim().to_string(),
                target_node_id: id_map
                    .get(target)
                    .cloned()
                    .unwrap_or_else(|| target.to_string()),
                score,
            });
        }

        nodes.push(Node {
            id,
            content: raw.content.clone(),
            media: Some(Media {
                kind: raw.media.kind,
                url: raw.media.url.trim().to_string(),
            }),
            transcript_url: optional(&raw.transcript_url),
            hint: optional(&raw.hint),
            overlay_text: raw.overlay_text,
            left_image_url: optional(&raw.left_image_url),
            right_image_url: optional(&raw.right_image_url),
            choices,
        });
        positions.push(position);
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(StagedScenario {
        nodes,
        positions,
        settings,
    })
}

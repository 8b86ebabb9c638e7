use bs_core::{
    BackgroundImage, ChoiceView, NodeView, Progress, Scenario, ScenarioError, ViewState,
};

use crate::scoring;

pub fn current_view(scenario: &Scenario, progress: &Progress) -> Result<ViewState, ScenarioError> {
    let node = scenario.node(&progress.current_node_id)?;
    let settings = &scenario.settings;

    let current_node = NodeView {
        id: node.id.clone(),
        content: node.content.clone(),
        media: bs_media::resolve(
            node.media_kind(),
            node.media_url(),
            node.transcript_url.as_deref(),
        ),
        hint: node
            .hint
            .clone()
            .filter(|hint| settings.enable_hints && !hint.trim().is_empty()),
        overlay_text: node.overlay_text,
        left_image_url: node.effective_left_image_url().to_string(),
        right_image_url: node.right_image_url.clone().unwrap_or_default(),
        choices: node
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| ChoiceView {
                index,
                text: choice.text.clone(),
            })
            .collect(),
        is_leaf: node.is_leaf(),
    };

    let background = (!settings.background_image_url.is_empty()).then(|| BackgroundImage {
        url: settings.background_image_url.clone(),
        alt_text: settings.background_image_alt_text.clone(),
        is_decorative: settings.background_image_is_decorative,
    });

    Ok(ViewState {
        completed: current_node.is_leaf,
        current_node,
        score: scoring::visible_score(scenario, progress),
        max_score: settings.max_score,
        history_length: progress.depth(),
        enable_undo: settings.enable_undo,
        enable_scoring: settings.enable_scoring,
        enable_hints: settings.enable_hints,
        enable_reset_activity: settings.enable_reset_activity,
        display_name: settings.display_name.clone(),
        background,
    })
}

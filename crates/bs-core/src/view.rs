use serde::{Deserialize, Serialize};

use crate::types::MediaKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaMode {
    None,
    DirectFile,
    Embed,
}

/// How a node's media should be rendered. Produced by the media resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMedia {
    pub mode: MediaMode,
    pub kind: MediaKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    pub show_transcript: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_url: Option<String>,
}

impl ResolvedMedia {
    pub fn none(kind: MediaKind) -> Self {
        Self {
            mode: MediaMode::None,
            kind,
            url: String::new(),
            embed_url: None,
            show_transcript: false,
            transcript_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: String,
    pub content: String,
    pub media: ResolvedMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub overlay_text: bool,
    pub left_image_url: String,
    pub right_image_url: String,
    pub choices: Vec<ChoiceView>,
    pub is_leaf: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundImage {
    pub url: String,
    pub alt_text: String,
    pub is_decorative: bool,
}

/// Read-only projection handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub current_node: NodeView,
    /// Only present on a leaf node with scoring enabled.
    pub score: Option<i64>,
    pub max_score: f64,
    pub history_length: usize,
    pub completed: bool,
    pub enable_undo: bool,
    pub enable_scoring: bool,
    pub enable_hints: bool,
    pub enable_reset_activity: bool,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundImage>,
}

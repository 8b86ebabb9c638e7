use bs_core::Media;
use serde::{Deserialize, Serialize};

/// A node as submitted by the authoring surface. Ids may be temporary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDraft {
    pub id: String,
    pub content: String,
    pub media: Media,
    pub choices: Vec<ChoiceDraft>,
    pub hint: String,
    pub overlay_text: bool,
    pub transcript_url: String,
    pub left_image_url: String,
    pub right_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceDraft {
    pub text: String,
    pub target_node_id: String,
    /// Integer, integral float or numeric string; coerced during staging.
    pub score: serde_json::Value,
}

impl Default for ChoiceDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            target_node_id: String::new(),
            score: serde_json::Value::from(0),
        }
    }
}

/// Settings fields left out keep their previous value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDraft {
    pub enable_undo: Option<bool>,
    pub enable_scoring: Option<bool>,
    pub enable_hints: Option<bool>,
    pub enable_reset_activity: Option<bool>,
    pub max_score: Option<f64>,
    pub display_name: Option<String>,
    pub background_image_url: Option<String>,
    pub background_image_alt_text: Option<String>,
    pub background_image_is_decorative: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDraft {
    #[serde(default)]
    pub nodes: Vec<NodeDraft>,
    #[serde(flatten)]
    pub settings: SettingsDraft,
}

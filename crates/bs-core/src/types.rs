use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ScenarioError};

pub const DEFAULT_DISPLAY_NAME: &str = "Branching Scenario";
pub const DEFAULT_MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    #[default]
    #[serde(alias = "")]
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub target_node_id: String,
    #[serde(default)]
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Rich text body, passed through untouched.
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub overlay_text: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_image_url: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    pub fn media_kind(&self) -> MediaKind {
        self.media.as_ref().map(|media| media.kind).unwrap_or_default()
    }

    pub fn media_url(&self) -> &str {
        self.media.as_ref().map(|media| media.url.as_str()).unwrap_or("")
    }

    /// Side image shown left of the content; image nodes fall back to their media url.
    pub fn effective_left_image_url(&self) -> &str {
        match self.left_image_url.as_deref() {
            Some(url) => url,
            None if self.media_kind() == MediaKind::Image => self.media_url(),
            None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enable_undo: bool,
    pub enable_scoring: bool,
    pub enable_hints: bool,
    pub enable_reset_activity: bool,
    pub max_score: f64,
    pub display_name: String,
    pub background_image_url: String,
    pub background_image_alt_text: String,
    pub background_image_is_decorative: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_undo: false,
            enable_scoring: false,
            enable_hints: true,
            enable_reset_activity: false,
            max_score: DEFAULT_MAX_SCORE,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            background_image_url: String::new(),
            background_image_alt_text: String::new(),
            background_image_is_decorative: false,
        }
    }
}

/// Authored graph plus its settings. Replaced wholesale on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub revision: u64,
    pub start_node_id: String,
    pub nodes: IndexMap<String, Node>,
    #[serde(default)]
    pub settings: Settings,
}

impl Scenario {
    /// Builds a scenario from nodes in authoring order. No integrity checks are made here.
    pub fn from_nodes(
        nodes: impl IntoIterator<Item = Node>,
        start_node_id: impl Into<String>,
        settings: Settings,
    ) -> Self {
        Self {
            revision: 0,
            start_node_id: start_node_id.into(),
            nodes: nodes
                .into_iter()
                .map(|node| (node.id.clone(), node))
                .collect(),
            settings,
        }
    }

    pub fn node(&self, id: &str) -> Result<&Node, ScenarioError> {
        self.nodes.get(id).ok_or_else(|| {
            ScenarioError::new(
                ErrorKind::NotFound,
                format!("Node \"{}\" does not exist.", id),
            )
        })
    }

    pub fn start_node(&self) -> Result<&Node, ScenarioError> {
        self.node(&self.start_node_id)
    }

    pub fn choice(&self, node_id: &str, index: usize) -> Result<&Choice, ScenarioError> {
        self.node(node_id)?.choice(index).ok_or_else(|| {
            ScenarioError::new(
                ErrorKind::NotFound,
                format!("Node \"{}\" has no choice at index {}.", node_id, index),
            )
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

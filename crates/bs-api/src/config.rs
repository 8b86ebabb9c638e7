use std::fs;
use std::path::Path;

use bs_authoring::{AuthoringLimits, MAX_NODES};
use bs_core::{ErrorKind, ScenarioError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_STATE_DIR: &str = ".branching";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub max_nodes: usize,
    pub log_filter: String,
    pub state_dir: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_nodes: MAX_NODES,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            state_dir: DEFAULT_STATE_DIR.to_string(),
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ScenarioError> {
        toml::from_str(raw).map_err(|error| {
            ScenarioError::new(
                ErrorKind::MalformedInput,
                format!("Invalid host config: {}", error),
            )
        })
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            ScenarioError::new(
                ErrorKind::NotFound,
                format!("Cannot read config {}: {}", path.display(), error),
            )
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn limits(&self) -> AuthoringLimits {
        AuthoringLimits {
            max_nodes: self.max_nodes,
        }
    }
}

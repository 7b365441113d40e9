//! Todo configuration
//!
//! Loaded from an optional YAML file; every field has a default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TodoError};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoConfig {
    /// What `add` does when the name is already present
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Interactive session settings
    #[serde(default)]
    pub repl: ReplSettings,
}

impl TodoConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| TodoError::Config(format!("YAML parse failed: {}", e)))
    }

    /// Read and parse a YAML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TodoError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), policy = ?config.duplicate_policy, "Loaded config");
        Ok(config)
    }
}

/// Duplicate-name handling for `add`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Warn and replace the stored priority
    #[default]
    Overwrite,
    /// Refuse the add and keep the existing priority
    Reject,
}

/// REPL settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplSettings {
    /// Prompt
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Print the welcome banner on start
    #[serde(default = "default_true")]
    pub show_banner: bool,
}

fn default_prompt() -> String {
    "todo> ".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReplSettings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_banner: default_true(),
        }
    }
}

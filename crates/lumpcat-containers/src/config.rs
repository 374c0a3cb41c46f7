//! Container configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{ContainerError, Result};

/// Options shared by all container kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Maximum recursion depth when walking a directory container
    pub max_directory_depth: usize,

    /// Subtree whose file names are registered verbatim
    pub scripts_directory: String,

    /// Hand global-namespace lumps to the content classifier
    pub classify_by_content: bool,

    /// Follow symbolic links when walking a directory container
    pub follow_links: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_directory_depth: 16,
            scripts_directory: "SCRIPTS".to_string(),
            classify_by_content: true,
            follow_links: false,
        }
    }
}

impl ContainerConfig {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        serde_json::from_slice(&data)
            .map_err(|e| ContainerError::Config(format!("{}: {e}", path.display())))
    }

    /// Set the directory walk depth
    #[must_use]
    pub const fn with_max_directory_depth(mut self, depth: usize) -> Self {
        self.max_directory_depth = depth;
        self
    }

    /// Set the verbatim scripts subtree
    #[must_use]
    pub fn with_scripts_directory(mut self, name: impl Into<String>) -> Self {
        self.scripts_directory = name.into();
        self
    }

    /// Enable or disable content classification
    #[must_use]
    pub const fn with_content_classification(mut self, enable: bool) -> Self {
        self.classify_by_content = enable;
        self
    }

    /// Enable or disable following symbolic links
    #[must_use]
    pub const fn with_follow_links(mut self, enable: bool) -> Self {
        self.follow_links = enable;
        self
    }
}

//! Campaign configuration, read from TOML.
//!
//! ```toml
//! data_dir = "data"
//! state_path = "state/campaign_state.json"
//! autosave = true
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::StateError;
use crate::store::StateStore;

/// Where reference data and campaign state live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// Root of the read-only reference data.
    pub data_dir: PathBuf,

    /// The persisted campaign document.
    pub state_path: PathBuf,

    /// Default save flag for callers that do not batch their mutations.
    pub autosave: bool,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            state_path: PathBuf::from("state").join("campaign_state.json"),
            autosave: true,
        }
    }
}

impl CampaignConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read a configuration file, resolving relative paths against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StateError::io(path, e))?;
        let config = Self::from_toml_str(&text).map_err(|source| StateError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        match path.parent() {
            Some(base) => Ok(config.resolved_against(base)),
            None => Ok(config),
        }
    }

    /// Rebase relative paths onto `base`.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        if self.state_path.is_relative() {
            self.state_path = base.join(&self.state_path);
        }
        self
    }

    /// A store for the configured state document.
    pub fn store(&self) -> StateStore {
        StateStore::new(&self.state_path)
    }
}

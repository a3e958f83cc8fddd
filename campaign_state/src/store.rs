//! Atomic persistence of the campaign document.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::document::CampaignState;
use crate::error::StateError;

/// Reads and writes the campaign document at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a document has been written yet.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the document, default-filling any missing sub-block.
    pub fn load(&self) -> Result<CampaignState, StateError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| StateError::io(&self.path, e))?;
        let state = CampaignState::from_json_str(&json).map_err(|e| StateError::json(&self.path, e))?;
        debug!(
            "Loaded campaign '{}' from {}",
            state.campaign_id,
            self.path.display()
        );
        Ok(state)
    }

    /// Write the whole document.
    ///
    /// The document is written to a temporary file next to the target and
    /// renamed over it, so a failed write leaves the previous version intact.
    pub fn save(&self, state: &CampaignState) -> Result<(), StateError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| StateError::io(&dir, e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StateError::io(&dir, e))?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), state)
            .map_err(|e| StateError::json(&self.path, e))?;
        tmp.as_file_mut()
            .write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StateError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StateError::io(&self.path, e.error))?;

        info!(
            "Saved campaign '{}' to {}",
            state.campaign_id,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::CollegeQuest;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state").join("campaign_state.json"));
        assert!(!store.exists());

        let mut state = CampaignState::new("test_001");
        state.silver_hand_state.awareness_level = 4;
        state.college_state.chain.activate(CollegeQuest::FirstLessons);
        store.save(&state).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.load(), Err(StateError::Io { .. })));
    }

    #[test]
    fn test_load_malformed_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaign_state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = StateStore::new(&path);
        assert!(matches!(store.load(), Err(StateError::Json { .. })));
    }

    #[test]
    fn test_load_fills_missing_blocks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaign_state.json");
        std::fs::write(&path, r#"{"campaign_id": "bare", "companions_state": {"beast_blood": true}}"#)
            .unwrap();

        let state = StateStore::new(&path).load().unwrap();
        assert_eq!(state.campaign_id, "bare");
        assert!(state.has_beast_blood());
        assert!(state.silver_hand_state.has_cell("frostmere_vigil"));
    }

    #[test]
    fn test_load_skips_unrecognised_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaign_state.json");
        std::fs::write(
            &path,
            r#"{
                "campaign_id": "newer_tools",
                "college_state": {
                    "active_quest": "college_under_saarthal",
                    "quest_progress": {
                        "college_midden_dark": "active",
                        "college_under_saarthal": "active"
                    }
                },
                "silver_hand_state": {
                    "awareness_level": 2,
                    "hunter_tiers_unlocked": ["scout", "shadow_patrons", "wolf_hunters"]
                }
            }"#,
        )
        .unwrap();

        let state = StateStore::new(&path).load().unwrap();
        assert_eq!(
            state.college_state.active_quest(),
            Some(CollegeQuest::UnderSaarthal)
        );
        assert_eq!(state.college_state.chain.quest_progress.len(), 1);
        assert_eq!(state.silver_hand_state.hunter_tiers_unlocked.len(), 2);
        assert_eq!(state.awareness(), 2);
    }

    #[test]
    fn test_unknown_keys_survive_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("campaign_state.json");
        std::fs::write(&path, r#"{"campaign_id": "c", "thalmor_arc": {"active_plots": ["a"]}}"#)
            .unwrap();

        let store = StateStore::new(&path);
        let state = store.load().unwrap();
        store.save(&state).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["thalmor_arc"]["active_plots"][0], "a");
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("campaign_state.json"));
        store.save(&CampaignState::new("one")).unwrap();
        store.save(&CampaignState::new("two")).unwrap();

        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
        assert_eq!(store.load().unwrap().campaign_id, "two");
    }
}

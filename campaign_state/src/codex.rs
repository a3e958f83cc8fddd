//! Reference data - quest definitions read from the data directory.
//!
//! The codex is loaded once and never mutated. Files that are absent yield an
//! empty section so a campaign can run before its data pack is complete.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

use crate::error::StateError;

/// College questline definitions, relative to the data directory.
pub const COLLEGE_QUESTS_FILE: &str = "quests/college_quests.json";

/// Dynamic Silver Hand quest definitions, relative to the data directory.
pub const SILVER_HAND_QUESTS_FILE: &str = "quests/silver_hand_dynamic.json";

/// Escalation clock definitions, relative to the data directory.
pub const SILVER_HAND_CLOCKS_FILE: &str = "clocks/silver_hand_clocks.json";

/// A quest as described by the data files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestDefinition {
    pub quest_id: String,
    /// Older files name the quest here instead of in `quest_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,

    /// Remaining descriptive fields, passed through untouched.
    #[serde(flatten)]
    pub details: HashMap<String, serde_json::Value>,
}

impl QuestDefinition {
    /// A definition carrying nothing but its identifier.
    pub fn bare(quest_id: impl Into<String>) -> Self {
        Self {
            quest_id: quest_id.into(),
            ..Self::default()
        }
    }
}

/// A tier unlocked when a clock reaches `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockUnlock {
    pub threshold: u8,
    pub tier: String,
}

/// An escalation clock as described by the data files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockDefinition {
    pub total_segments: u8,
    /// Tier unlocks in threshold order. Empty when the file lists none.
    pub unlocks: Vec<ClockUnlock>,

    #[serde(flatten)]
    pub details: HashMap<String, serde_json::Value>,
}

/// A named group of clocks, e.g. `silver_hand_clocks`.
#[derive(Debug, Deserialize)]
struct ClockGroup {
    clocks: BTreeMap<String, ClockDefinition>,
}

/// Read-only reference data for a campaign.
#[derive(Debug, Clone, Default)]
pub struct Codex {
    college_quests: BTreeMap<String, QuestDefinition>,
    silver_hand_quests: BTreeMap<String, QuestDefinition>,
    clocks: BTreeMap<String, ClockDefinition>,
}

impl Codex {
    /// Create an empty codex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every known reference file under `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, StateError> {
        let data_dir = data_dir.as_ref();
        let codex = Self {
            college_quests: read_definitions(&data_dir.join(COLLEGE_QUESTS_FILE))?,
            silver_hand_quests: read_definitions(&data_dir.join(SILVER_HAND_QUESTS_FILE))?,
            clocks: read_clocks(&data_dir.join(SILVER_HAND_CLOCKS_FILE))?,
        };
        info!(
            "Loaded codex from {}: {} College quests, {} Silver Hand quests, {} clocks",
            data_dir.display(),
            codex.college_quests.len(),
            codex.silver_hand_quests.len(),
            codex.clocks.len()
        );
        Ok(codex)
    }

    /// Add or replace a College quest definition.
    pub fn with_college_quest(mut self, quest: QuestDefinition) -> Self {
        self.college_quests.insert(quest.quest_id.clone(), quest);
        self
    }

    /// Add or replace a Silver Hand quest definition.
    pub fn with_silver_hand_quest(mut self, quest: QuestDefinition) -> Self {
        self.silver_hand_quests.insert(quest.quest_id.clone(), quest);
        self
    }

    /// Add or replace a clock definition.
    pub fn with_clock(mut self, name: impl Into<String>, clock: ClockDefinition) -> Self {
        self.clocks.insert(name.into(), clock);
        self
    }

    pub fn college_quest(&self, quest_id: &str) -> Option<&QuestDefinition> {
        self.college_quests.get(quest_id)
    }

    pub fn college_quests(&self) -> &BTreeMap<String, QuestDefinition> {
        &self.college_quests
    }

    pub fn silver_hand_quest(&self, quest_id: &str) -> Option<&QuestDefinition> {
        self.silver_hand_quests.get(quest_id)
    }

    pub fn silver_hand_quests(&self) -> &BTreeMap<String, QuestDefinition> {
        &self.silver_hand_quests
    }

    pub fn clock(&self, name: &str) -> Option<&ClockDefinition> {
        self.clocks.get(name)
    }

    pub fn clocks(&self) -> &BTreeMap<String, ClockDefinition> {
        &self.clocks
    }
}

/// Parse a reference file, or `None` if it does not exist.
fn read_reference<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StateError> {
    if !path.is_file() {
        warn!("Reference file {} not found, skipping", path.display());
        return Ok(None);
    }

    let json = std::fs::read_to_string(path).map_err(|e| StateError::io(path, e))?;
    let parsed = serde_json::from_str(&json).map_err(|e| StateError::json(path, e))?;
    Ok(Some(parsed))
}

/// Read an `id -> definition` mapping.
///
/// A definition without `quest_id` takes its `id`, or failing that its key.
fn read_definitions(path: &Path) -> Result<BTreeMap<String, QuestDefinition>, StateError> {
    let mut definitions: BTreeMap<String, QuestDefinition> =
        read_reference(path)?.unwrap_or_default();

    for (key, definition) in definitions.iter_mut() {
        if definition.quest_id.is_empty() {
            definition.quest_id = match &definition.id {
                Some(id) if !id.is_empty() => id.clone(),
                _ => key.clone(),
            };
        }
    }
    Ok(definitions)
}

/// Read every clock from a `{group: {clocks: {name: definition}}}` file.
///
/// Top-level entries without a `clocks` table are ignored.
fn read_clocks(path: &Path) -> Result<BTreeMap<String, ClockDefinition>, StateError> {
    let groups: BTreeMap<String, serde_json::Value> = read_reference(path)?.unwrap_or_default();

    let mut clocks = BTreeMap::new();
    for group in groups.values().filter(|group| group.get("clocks").is_some()) {
        let group = ClockGroup::deserialize(group).map_err(|e| StateError::json(path, e))?;
        clocks.extend(group.clocks);
    }
    Ok(clocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_load_definitions() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            COLLEGE_QUESTS_FILE,
            r#"{
                "college_first_lessons": {
                    "quest_id": "college_first_lessons",
                    "name": "First Lessons",
                    "description": "Tolfdir's introductory lecture.",
                    "rewards": ["novice_robes"]
                }
            }"#,
        );
        write(
            dir.path(),
            SILVER_HAND_QUESTS_FILE,
            r#"{
                "silver_hand_hunt_the_beast": {
                    "id": "silver_hand_hunt_the_beast",
                    "name": "Hunt the Beast",
                    "description": "Hunters close in.",
                    "faction": "silver_hand",
                    "activation_conditions": {"awareness_level": 2}
                }
            }"#,
        );

        let codex = Codex::load(dir.path()).unwrap();
        let lessons = codex.college_quest("college_first_lessons").unwrap();
        assert_eq!(lessons.name, "First Lessons");
        assert!(lessons.details.contains_key("rewards"));

        let hunt = codex.silver_hand_quest("silver_hand_hunt_the_beast").unwrap();
        assert_eq!(hunt.quest_id, "silver_hand_hunt_the_beast");
        assert_eq!(hunt.faction.as_deref(), Some("silver_hand"));
    }

    #[test]
    fn test_missing_files_yield_empty_codex() {
        let dir = TempDir::new().unwrap();
        let codex = Codex::load(dir.path()).unwrap();
        assert!(codex.college_quests().is_empty());
        assert!(codex.silver_hand_quests().is_empty());
        assert!(codex.clocks().is_empty());
    }

    #[test]
    fn test_definition_with_id_and_quest_id() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            COLLEGE_QUESTS_FILE,
            r#"{"college_first_lessons": {
                "id": "college_first_lessons",
                "quest_id": "college_first_lessons",
                "name": "First Lessons"
            }}"#,
        );

        let codex = Codex::load(dir.path()).unwrap();
        let lessons = codex.college_quest("college_first_lessons").unwrap();
        assert_eq!(lessons.quest_id, "college_first_lessons");
        assert_eq!(lessons.id.as_deref(), Some("college_first_lessons"));
        assert_eq!(lessons.name, "First Lessons");
    }

    #[test]
    fn test_load_clocks() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            SILVER_HAND_CLOCKS_FILE,
            r#"{
                "version": 2,
                "silver_hand_clocks": {
                    "description": "Silver Hand threat tracks",
                    "clocks": {
                        "silver_hand_awareness": {
                            "total_segments": 6,
                            "unlocks": [
                                {"threshold": 1, "tier": "scout"},
                                {"threshold": 2, "tier": "wolf_hunters"}
                            ],
                            "reset_condition": "hq_destroyed"
                        }
                    }
                }
            }"#,
        );

        let codex = Codex::load(dir.path()).unwrap();
        let awareness = codex.clock("silver_hand_awareness").unwrap();
        assert_eq!(awareness.total_segments, 6);
        assert_eq!(awareness.unlocks[1].tier, "wolf_hunters");
        assert!(awareness.details.contains_key("reset_condition"));
    }

    #[test]
    fn test_missing_id_takes_key() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            COLLEGE_QUESTS_FILE,
            r#"{"college_midden_dark": {"name": "The Midden Dark"}}"#,
        );
        let codex = Codex::load(dir.path()).unwrap();
        assert_eq!(
            codex.college_quest("college_midden_dark").unwrap().quest_id,
            "college_midden_dark"
        );
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), SILVER_HAND_QUESTS_FILE, "[1, 2");
        assert!(matches!(Codex::load(dir.path()), Err(StateError::Json { .. })));
    }
}

//! The campaign state document - the single structure every engine reads and mutates.
//!
//! The document is a JSON object. Each known sub-block is typed and filled with
//! its defaults when absent; unknown top-level keys ride along in
//! [`CampaignState::extra`] so a load/save cycle never drops data written by
//! other tools.

mod civil_war;
mod college;
mod companions;
mod flags;
mod player;
mod silver_hand;

pub use civil_war::*;
pub use college::*;
pub use companions::*;
pub use flags::*;
pub use player::*;
pub use silver_hand::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The complete state of a campaign at any point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignState {
    pub campaign_id: String,
    pub current_act: u32,

    /// Faction the party started with, set by session zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_faction: Option<String>,

    pub college_state: CollegeState,
    pub silver_hand_state: SilverHandState,
    pub companions_state: CompanionsState,
    pub civil_war_state: CivilWarState,

    /// Travelling party.
    pub companions: CompanionRoster,

    pub scene_flags: SceneFlags,
    pub player: PlayerProfile,

    /// Top-level keys this crate does not model.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for CampaignState {
    fn default() -> Self {
        Self {
            campaign_id: String::new(),
            current_act: 1,
            starting_faction: None,
            college_state: CollegeState::default(),
            silver_hand_state: SilverHandState::default(),
            companions_state: CompanionsState::default(),
            civil_war_state: CivilWarState::default(),
            companions: CompanionRoster::default(),
            scene_flags: SceneFlags::default(),
            player: PlayerProfile::default(),
            extra: HashMap::new(),
        }
    }
}

impl CampaignState {
    /// Create a fresh campaign document with default sub-blocks.
    pub fn new(campaign_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            ..Self::default()
        }
    }

    /// Parse a document, filling defaults for anything missing.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if the player carries beast blood.
    pub fn has_beast_blood(&self) -> bool {
        self.companions_state.beast_blood
    }

    /// Current Silver Hand awareness.
    pub fn awareness(&self) -> u8 {
        self.silver_hand_state.awareness_level
    }
}

//! Companions guild progression and the travelling party roster.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The `companions_state` block: the player's standing with the Companions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionsState {
    pub beast_blood: bool,
    pub beast_blood_tier: u8,
    pub sovngarde_blessing_tier: u8,
    pub companions_rank: String,
    pub kodlak_quest_complete: bool,
    pub harbinger: bool,
}

/// The `companions` block: who is travelling with the party.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionRoster {
    pub active_companions: Vec<String>,
    pub available_companions: Vec<String>,
    pub dismissed_companions: Vec<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CompanionRoster {
    /// Check if a companion is in the active party, ignoring case.
    pub fn is_present(&self, companion: &str) -> bool {
        let wanted = companion.trim();
        self.active_companions
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(wanted))
    }
}

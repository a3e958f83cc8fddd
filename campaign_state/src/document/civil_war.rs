//! Civil war standing and the Battle of Whiterun.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Last stage of the Battle of Whiterun.
pub const FINAL_BATTLE_STAGE: u8 = 5;

/// Sides of the civil war a player or battle can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Allegiance {
    Imperial,
    Stormcloak,
    #[default]
    Neutral,
}

impl Allegiance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Allegiance::Imperial => "imperial",
            Allegiance::Stormcloak => "stormcloak",
            Allegiance::Neutral => "neutral",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "imperial" | "imperials" | "imperial_legion" => Some(Allegiance::Imperial),
            "stormcloak" | "stormcloaks" => Some(Allegiance::Stormcloak),
            "neutral" => Some(Allegiance::Neutral),
            _ => None,
        }
    }

    /// Capitalised name for headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Allegiance::Imperial => "Imperial",
            Allegiance::Stormcloak => "Stormcloak",
            Allegiance::Neutral => "Neutral",
        }
    }
}

impl From<String> for Allegiance {
    fn from(label: String) -> Self {
        Allegiance::parse(&label).unwrap_or_default()
    }
}

impl From<Allegiance> for String {
    fn from(allegiance: Allegiance) -> Self {
        allegiance.as_str().to_string()
    }
}

/// Status of the Battle of Whiterun.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BattleStatus {
    #[default]
    Approaching,
    Active,
    /// Any later status, kept verbatim.
    Other(String),
}

impl From<String> for BattleStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "approaching" => BattleStatus::Approaching,
            "active" => BattleStatus::Active,
            _ => BattleStatus::Other(label),
        }
    }
}

impl From<BattleStatus> for String {
    fn from(status: BattleStatus) -> Self {
        match status {
            BattleStatus::Approaching => "approaching".to_string(),
            BattleStatus::Active => "active".to_string(),
            BattleStatus::Other(label) => label,
        }
    }
}

/// The `civil_war_state` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CivilWarState {
    pub player_alliance: Allegiance,
    pub battle_of_whiterun_status: BattleStatus,
    pub battle_of_whiterun_stage: u8,
    /// Side holding the field, persisted as `""` when unset.
    #[serde(with = "battle_faction")]
    pub battle_of_whiterun_faction: Option<Allegiance>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CivilWarState {
    /// Check if the siege of Whiterun is underway.
    pub fn siege_active(&self) -> bool {
        self.battle_of_whiterun_status == BattleStatus::Active
    }

    /// Current battle stage, capped at [`FINAL_BATTLE_STAGE`].
    pub fn siege_stage(&self) -> u8 {
        self.battle_of_whiterun_stage.min(FINAL_BATTLE_STAGE)
    }
}

mod battle_faction {
    use super::Allegiance;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(faction: &Option<Allegiance>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(faction.map(|f| f.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Allegiance>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match Allegiance::parse(&label) {
            Some(Allegiance::Neutral) | None => None,
            side => side,
        })
    }
}

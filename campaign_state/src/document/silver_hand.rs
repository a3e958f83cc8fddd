//! Silver Hand awareness block.

use serde::{Deserialize, Deserializer, Serialize};

/// Highest awareness level the Silver Hand can reach.
pub const AWARENESS_MAX: u8 = 6;

/// Cell every campaign starts with.
pub const STARTING_CELL: &str = "frostmere_vigil";

/// Hunter tiers unlocked as awareness rises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HunterTier {
    Scout,
    WolfHunters,
    PurifierSquad,
    HighPurifiersChosen,
}

impl HunterTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            HunterTier::Scout => "scout",
            HunterTier::WolfHunters => "wolf_hunters",
            HunterTier::PurifierSquad => "purifier_squad",
            HunterTier::HighPurifiersChosen => "high_purifiers_chosen",
        }
    }
}

/// The `silver_hand_state` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilverHandState {
    /// Awareness of the player, 0 to [`AWARENESS_MAX`].
    #[serde(deserialize_with = "clamped_awareness")]
    pub awareness_level: u8,
    pub hq_discovered: bool,
    pub high_purifier_alive: bool,
    pub active_cells: Vec<String>,
    /// Unlocked tiers in unlock order. Unrecognised tiers are dropped on load.
    #[serde(deserialize_with = "crate::lenient::known_entries")]
    pub hunter_tiers_unlocked: Vec<HunterTier>,
    pub active_hunts: Vec<serde_json::Value>,
}

impl Default for SilverHandState {
    fn default() -> Self {
        Self {
            awareness_level: 0,
            hq_discovered: false,
            high_purifier_alive: true,
            active_cells: vec![STARTING_CELL.to_string()],
            hunter_tiers_unlocked: Vec::new(),
            active_hunts: Vec::new(),
        }
    }
}

impl SilverHandState {
    /// Check if a cell is active.
    pub fn has_cell(&self, cell: &str) -> bool {
        self.active_cells.iter().any(|c| c == cell)
    }

    /// Activate a cell. Returns false if it already was.
    pub fn add_cell(&mut self, cell: impl Into<String>) -> bool {
        let cell = cell.into();
        if self.has_cell(&cell) {
            return false;
        }
        self.active_cells.push(cell);
        true
    }

    /// Check if a hunter tier has been unlocked.
    pub fn has_tier(&self, tier: HunterTier) -> bool {
        self.hunter_tiers_unlocked.contains(&tier)
    }
}

/// Older documents may carry awareness outside the clock's range.
fn clamped_awareness<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, AWARENESS_MAX as i64) as u8)
}

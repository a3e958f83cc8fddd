//! Escalation Engine - Silver Hand awareness and its consequences.
//!
//! The engine drives the [`SILVER_HAND_AWARENESS`] clock:
//! 1. **Increment**: awareness moves (clamped) and crossed thresholds unlock hunter tiers
//! 2. **Escalate**: a full clock reveals the Silver Hand headquarters, once
//! 3. **Event**: the current level selects a hunt event for beast-blooded parties
//! 4. **Outcome**: a resolved confrontation applies a fixed state delta

mod clock;

pub use clock::*;

use campaign_state::{CampaignState, Codex, HunterTier, SilverHandState};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Cell activated when every Silver Hand leader falls.
pub const GALLOWS_ROCK_CELL: &str = "gallows_rock";

/// Hunt events, one per awareness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SilverHandEvent {
    #[serde(rename = "silver_hand_scout_sighting")]
    ScoutSighting,
    #[serde(rename = "silver_hand_ambush")]
    Ambush,
    #[serde(rename = "silver_hand_purifier_raid")]
    PurifierRaid,
    #[serde(rename = "silver_hand_chosen_manhunt")]
    ChosenManhunt,
    #[serde(rename = "silver_hand_jorrvaskr_assault")]
    JorrvaskrAssault,
    #[serde(rename = "silver_hand_final_purge")]
    FinalPurge,
}

impl SilverHandEvent {
    /// The event for an awareness level, if the level has one.
    pub fn for_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(SilverHandEvent::ScoutSighting),
            2 => Some(SilverHandEvent::Ambush),
            3 => Some(SilverHandEvent::PurifierRaid),
            4 => Some(SilverHandEvent::ChosenManhunt),
            5 => Some(SilverHandEvent::JorrvaskrAssault),
            6 => Some(SilverHandEvent::FinalPurge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SilverHandEvent::ScoutSighting => "silver_hand_scout_sighting",
            SilverHandEvent::Ambush => "silver_hand_ambush",
            SilverHandEvent::PurifierRaid => "silver_hand_purifier_raid",
            SilverHandEvent::ChosenManhunt => "silver_hand_chosen_manhunt",
            SilverHandEvent::JorrvaskrAssault => "silver_hand_jorrvaskr_assault",
            SilverHandEvent::FinalPurge => "silver_hand_final_purge",
        }
    }
}

impl fmt::Display for SilverHandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event selected for the current awareness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationEvent {
    pub level: u8,
    pub event: SilverHandEvent,
}

/// Resolutions of the confrontation at the Silver Hand headquarters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfrontationOutcome {
    /// Valdrek and Kaari both die.
    AllLeadersKilled,
    /// Valdrek survives; nothing changes.
    ValdrekAlive,
    /// Both leaders are spared.
    BothLeadersSpared,
    /// Kaari takes over from the fallen High Purifier.
    KaariTakesCommand,
}

impl ConfrontationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfrontationOutcome::AllLeadersKilled => "all_leaders_killed",
            ConfrontationOutcome::ValdrekAlive => "valdrek_alive",
            ConfrontationOutcome::BothLeadersSpared => "both_leaders_spared",
            ConfrontationOutcome::KaariTakesCommand => "kaari_takes_command",
        }
    }

    /// Parse an outcome key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "all_leaders_killed" => Some(ConfrontationOutcome::AllLeadersKilled),
            "valdrek_alive" => Some(ConfrontationOutcome::ValdrekAlive),
            "both_leaders_spared" => Some(ConfrontationOutcome::BothLeadersSpared),
            "kaari_takes_command" => Some(ConfrontationOutcome::KaariTakesCommand),
            _ => None,
        }
    }
}

/// How the awareness clock in the reference data compares to the built-in one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCheck {
    Agrees,
    /// No definition in the data; the built-in clock applies.
    Missing,
    /// The data disagrees; the built-in clock still applies.
    Differs,
}

/// Compare the codex's awareness clock with [`SILVER_HAND_AWARENESS`].
pub fn check_clock_definition(codex: &Codex) -> ClockCheck {
    let name = SILVER_HAND_AWARENESS.name;
    match codex.clock(name) {
        None => {
            warn!("No '{}' clock in reference data, using built-in definition", name);
            ClockCheck::Missing
        }
        Some(definition) if SILVER_HAND_AWARENESS.agrees_with(definition, |tier| tier.as_str()) => {
            ClockCheck::Agrees
        }
        Some(definition) => {
            warn!(
                "Clock '{}' in reference data has {} segments and {} unlocks, using built-in {} and {}",
                name,
                definition.total_segments,
                definition.unlocks.len(),
                SILVER_HAND_AWARENESS.segments,
                SILVER_HAND_AWARENESS.unlocks.len()
            );
            ClockCheck::Differs
        }
    }
}

/// The Silver Hand block of the document.
pub fn get_state(state: &mut CampaignState) -> &mut SilverHandState {
    &mut state.silver_hand_state
}

/// Move awareness by `amount` (clamped) and unlock any tiers now reached.
///
/// Returns the tiers unlocked by this call.
pub fn increment(state: &mut CampaignState, amount: i64) -> Vec<HunterTier> {
    let silver_hand = get_state(state);
    let before = silver_hand.awareness_level;
    silver_hand.awareness_level = SILVER_HAND_AWARENESS.advance(before, amount);

    let unlocked = SILVER_HAND_AWARENESS.unlock_through(
        silver_hand.awareness_level,
        &mut silver_hand.hunter_tiers_unlocked,
    );

    info!(
        "Silver Hand awareness {} -> {}",
        before, silver_hand.awareness_level
    );
    for tier in &unlocked {
        info!("Unlocked Silver Hand tier '{}'", tier.as_str());
    }
    unlocked
}

/// Reveal the headquarters once awareness is full.
///
/// Returns true only on the call that flips `hq_discovered`.
pub fn trigger_escalation(state: &mut CampaignState) -> bool {
    let silver_hand = get_state(state);
    if silver_hand.hq_discovered || !SILVER_HAND_AWARENESS.is_full(silver_hand.awareness_level) {
        return false;
    }

    silver_hand.hq_discovered = true;
    info!("Silver Hand headquarters discovered");
    true
}

/// The hunt event for the current awareness level.
///
/// Nothing hunts a party without beast blood, and nothing happens at level 0.
pub fn trigger_event(state: &CampaignState) -> Option<EscalationEvent> {
    if !state.has_beast_blood() {
        return None;
    }

    let level = state.awareness();
    SilverHandEvent::for_level(level).map(|event| EscalationEvent { level, event })
}

/// Apply a confrontation outcome by key. Unknown keys change nothing.
///
/// Returns the outcome applied.
pub fn record_outcome(state: &mut CampaignState, outcome_key: &str) -> Option<ConfrontationOutcome> {
    match ConfrontationOutcome::from_key(outcome_key) {
        Some(outcome) => {
            apply_outcome(state, outcome);
            Some(outcome)
        }
        None => {
            debug!("Ignoring unknown Silver Hand outcome '{}'", outcome_key);
            None
        }
    }
}

/// Apply a confrontation outcome.
pub fn apply_outcome(state: &mut CampaignState, outcome: ConfrontationOutcome) {
    let silver_hand = get_state(state);
    match outcome {
        ConfrontationOutcome::AllLeadersKilled => {
            silver_hand.high_purifier_alive = false;
            silver_hand.awareness_level = SILVER_HAND_AWARENESS.advance(silver_hand.awareness_level, -3);
            silver_hand.add_cell(GALLOWS_ROCK_CELL);
        }
        ConfrontationOutcome::ValdrekAlive => {}
        ConfrontationOutcome::BothLeadersSpared => {
            silver_hand.awareness_level = SILVER_HAND_AWARENESS.advance(silver_hand.awareness_level, -2);
        }
        ConfrontationOutcome::KaariTakesCommand => {
            silver_hand.high_purifier_alive = false;
        }
    }
    info!(
        "Recorded Silver Hand outcome '{}', awareness now {}",
        outcome.as_str(),
        silver_hand.awareness_level
    );
}

//! Session zero - the campaign-state side of starting a new campaign.

use campaign_state::{Allegiance, CampaignState, CollegeQuest};
use tracing::info;
use uuid::Uuid;

use crate::quest_chain::{self, QuestChain};

/// Faction id recorded for a College start.
pub const COLLEGE_FACTION: &str = "college_of_winterhold";

/// Faction id a party starts with, given its alliance and neutral sub-faction.
pub fn starting_faction(alliance: Allegiance, subfaction: Option<&str>) -> String {
    match alliance {
        Allegiance::Imperial => "imperial_legion".to_string(),
        Allegiance::Stormcloak => "stormcloaks".to_string(),
        Allegiance::Neutral => match subfaction.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "college" || s == COLLEGE_FACTION => COLLEGE_FACTION.to_string(),
            Some(s) if !s.is_empty() => s,
            _ => "neutral".to_string(),
        },
    }
}

/// Initialise campaign state for a new party.
///
/// Records the alliance and starting faction, gives the campaign an id if it
/// has none, and starts the College questline only for College starts.
/// Returns the starting faction.
pub fn begin_campaign(
    state: &mut CampaignState,
    alliance: Allegiance,
    subfaction: Option<&str>,
) -> String {
    if state.campaign_id.is_empty() {
        state.campaign_id = format!("campaign_{}", Uuid::new_v4().simple());
    }

    let faction = starting_faction(alliance, subfaction);
    state.civil_war_state.player_alliance = alliance;
    state.starting_faction = Some(faction.clone());

    if faction == COLLEGE_FACTION {
        quest_chain::start(state, CollegeQuest::ROOT);
    }

    info!(
        "Campaign '{}' begins as {} ({})",
        state.campaign_id,
        faction,
        alliance.as_str()
    );
    faction
}

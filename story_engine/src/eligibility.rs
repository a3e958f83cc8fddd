//! Eligibility Engine - activation rules for dynamic Silver Hand quests.

use campaign_state::{CampaignState, SilverHandQuest};
use tracing::debug;

/// Check a quest id against the rule table. Unknown ids are never eligible.
pub fn check_eligibility(quest_id: &str, state: &CampaignState) -> bool {
    match SilverHandQuest::from_id(quest_id) {
        Some(quest) => is_eligible(quest, state),
        None => {
            debug!("No eligibility rule for quest '{}'", quest_id);
            false
        }
    }
}

/// Check if a Silver Hand quest can activate in the current state.
pub fn is_eligible(quest: SilverHandQuest, state: &CampaignState) -> bool {
    let silver_hand = &state.silver_hand_state;
    let awareness = silver_hand.awareness_level;

    match quest {
        SilverHandQuest::HuntTheBeast => awareness >= 2,
        SilverHandQuest::SiegeOfJorrvaskr => awareness >= 5 && state.has_beast_blood(),
        SilverHandQuest::PurificationRitual => awareness >= 3,
        SilverHandQuest::HighPurifierShowdown => awareness >= 6 && silver_hand.high_purifier_alive,
    }
}

/// Every Silver Hand quest currently eligible, in declaration order.
pub fn eligible_quests(state: &CampaignState) -> Vec<SilverHandQuest> {
    SilverHandQuest::ALL
        .into_iter()
        .filter(|quest| is_eligible(*quest, state))
        .collect()
}

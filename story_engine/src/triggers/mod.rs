//! Location triggers - narrative events derived from where the party stands.
//!
//! Each trigger set is a function of `(location key, state)`. Location keys are
//! matched case-insensitively. The only state a trigger writes is
//! [`SceneFlags`](campaign_state::SceneFlags), so first-time beats fire once per
//! campaign.

mod whiterun;
mod winterhold;

pub use whiterun::*;
pub use winterhold::*;

use campaign_state::CampaignState;

/// Run every trigger set for `location` and concatenate their events.
pub fn location_events(location: &str, state: &mut CampaignState) -> Vec<String> {
    let key = location_key(location);
    let mut events = whiterun_events(&key, state);
    events.extend(winterhold_events(&key, state));
    events
}

/// Normalise a location key for matching.
pub fn location_key(location: &str) -> String {
    location.trim().to_ascii_lowercase()
}

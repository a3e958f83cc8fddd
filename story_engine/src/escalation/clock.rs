//! Bounded escalation clocks with cumulative tier unlocks.

use campaign_state::{ClockDefinition, HunterTier, AWARENESS_MAX};

/// A bounded counter whose thresholds unlock tiers.
///
/// Unlocks are one-way: lowering the counter never removes a tier, and a tier
/// is recorded at most once.
#[derive(Debug, Clone, Copy)]
pub struct EscalationClock<T: 'static> {
    pub name: &'static str,
    /// Highest value the counter can hold.
    pub segments: u8,
    /// `(threshold, tier)` pairs in increasing threshold order.
    pub unlocks: &'static [(u8, T)],
}

/// The Silver Hand's awareness of the party.
pub const SILVER_HAND_AWARENESS: EscalationClock<HunterTier> = EscalationClock {
    name: "silver_hand_awareness",
    segments: AWARENESS_MAX,
    unlocks: &[
        (1, HunterTier::Scout),
        (2, HunterTier::WolfHunters),
        (3, HunterTier::PurifierSquad),
        (4, HunterTier::HighPurifiersChosen),
    ],
};

impl<T: Copy + PartialEq> EscalationClock<T> {
    /// Clamp a raw value into `[0, segments]`.
    pub fn clamp(&self, value: i64) -> u8 {
        value.clamp(0, self.segments as i64) as u8
    }

    /// Move the counter by `amount` in either direction.
    pub fn advance(&self, level: u8, amount: i64) -> u8 {
        self.clamp((level as i64).saturating_add(amount))
    }

    /// Tiers whose threshold is at or below `level`, in threshold order.
    pub fn tiers_through(&self, level: u8) -> impl Iterator<Item = T> + '_ {
        self.unlocks
            .iter()
            .take_while(move |(threshold, _)| *threshold <= level)
            .map(|(_, tier)| *tier)
    }

    /// Append every tier reached at `level` that is not yet in `unlocked`.
    ///
    /// Returns the newly added tiers.
    pub fn unlock_through(&self, level: u8, unlocked: &mut Vec<T>) -> Vec<T> {
        let mut added = Vec::new();
        for tier in self.tiers_through(level) {
            if !unlocked.contains(&tier) {
                unlocked.push(tier);
                added.push(tier);
            }
        }
        added
    }

    /// Check if the counter is full.
    pub fn is_full(&self, level: u8) -> bool {
        level >= self.segments
    }

    /// Check a data-file definition against this clock.
    ///
    /// Segments must agree. Unlocks are compared only when the definition
    /// lists them, naming each tier through `tier_id`.
    pub fn agrees_with(&self, definition: &ClockDefinition, tier_id: impl Fn(T) -> &'static str) -> bool {
        if definition.total_segments != self.segments {
            return false;
        }
        definition.unlocks.is_empty()
            || (definition.unlocks.len() == self.unlocks.len()
                && definition
                    .unlocks
                    .iter()
                    .zip(self.unlocks)
                    .all(|(unlock, (threshold, tier))| {
                        unlock.threshold == *threshold && unlock.tier == tier_id(*tier)
                    }))
    }
}

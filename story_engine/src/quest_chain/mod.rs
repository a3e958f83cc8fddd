//! Quest Chain Engine - ordered questline advancement.
//!
//! A chain is a fixed linear successor relation over a closed set of quest ids.
//! Progress lives in a [`QuestLedger`] inside the campaign document:
//! 1. **Start**: the root becomes the active quest
//! 2. **Complete**: the active quest is recorded as completed
//! 3. **Advance**: its successor (if any) becomes active
//!
//! The College of Winterhold questline is the chain implemented here.

use campaign_state::{CampaignState, Codex, CollegeQuest, QuestDefinition, QuestLedger};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::error::StoryError;

/// Eye instability at which the Eye of Magnus threatens a dragonbreak.
pub const DRAGONBREAK_INSTABILITY: u32 = 5;

/// Where an available quest comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestSource {
    College,
    SilverHand,
}

impl QuestSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestSource::College => "college",
            QuestSource::SilverHand => "silver_hand",
        }
    }

    /// Look up the reference definition of a quest from this source.
    pub fn definition<'c>(&self, codex: &'c Codex, quest_id: &str) -> Option<&'c QuestDefinition> {
        match self {
            QuestSource::College => codex.college_quest(quest_id),
            QuestSource::SilverHand => codex.silver_hand_quest(quest_id),
        }
    }
}

impl fmt::Display for QuestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quest offered to the party, tagged by its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDescriptor {
    #[serde(rename = "type")]
    pub source: QuestSource,
    pub quest: QuestDefinition,
}

impl QuestDescriptor {
    /// Describe `quest_id` from the codex, or by id alone if the codex lacks it.
    pub fn lookup(source: QuestSource, quest_id: &str, codex: &Codex) -> Self {
        let quest = source
            .definition(codex, quest_id)
            .cloned()
            .unwrap_or_else(|| QuestDefinition::bare(quest_id));
        Self { source, quest }
    }
}

/// A questline with a fixed successor relation.
pub trait QuestChain: Copy + Ord + fmt::Display + 'static {
    /// Tag for descriptors and errors.
    const SOURCE: QuestSource;

    /// First quest of the chain.
    const ROOT: Self;

    /// The quest that follows this one, or `None` at the end of the chain.
    fn successor(self) -> Option<Self>;

    /// Persisted identifier.
    fn id(self) -> &'static str;

    fn ledger(state: &CampaignState) -> &QuestLedger<Self>;

    fn ledger_mut(state: &mut CampaignState) -> &mut QuestLedger<Self>;
}

impl QuestChain for CollegeQuest {
    const SOURCE: QuestSource = QuestSource::College;
    const ROOT: Self = CollegeQuest::FirstLessons;

    fn successor(self) -> Option<Self> {
        match self {
            CollegeQuest::FirstLessons => Some(CollegeQuest::UnderSaarthal),
            CollegeQuest::UnderSaarthal => Some(CollegeQuest::HittingTheBooks),
            CollegeQuest::HittingTheBooks => Some(CollegeQuest::RevealingTheUnseen),
            CollegeQuest::RevealingTheUnseen => Some(CollegeQuest::StaffOfMagnus),
            CollegeQuest::StaffOfMagnus => Some(CollegeQuest::EyeOfMagnus),
            CollegeQuest::EyeOfMagnus => None,
        }
    }

    fn id(self) -> &'static str {
        self.as_str()
    }

    fn ledger(state: &CampaignState) -> &QuestLedger<Self> {
        &state.college_state.chain
    }

    fn ledger_mut(state: &mut CampaignState) -> &mut QuestLedger<Self> {
        &mut state.college_state.chain
    }
}

/// Make `root` the active quest of its chain.
///
/// Re-starting an already active quest only re-asserts its progress entry.
/// Returns true if the active quest changed.
pub fn start<Q: QuestChain>(state: &mut CampaignState, root: Q) -> bool {
    let ledger = Q::ledger_mut(state);
    let changed = ledger.active_quest != Some(root);
    ledger.activate(root);

    if changed {
        info!("Started {} quest '{}'", Q::SOURCE, root);
    }
    changed
}

/// Complete the active quest and advance to its successor.
///
/// Returns the new active quest, or `None` when the chain is finished.
pub fn complete_active<Q: QuestChain>(state: &mut CampaignState) -> Result<Option<Q>, StoryError> {
    let ledger = Q::ledger_mut(state);
    let current = ledger
        .active_quest
        .ok_or(StoryError::NoActiveQuest { chain: Q::SOURCE })?;

    ledger.record_completed(current);
    let next = current.successor();
    match next {
        Some(quest) => ledger.activate(quest),
        None => ledger.active_quest = None,
    }

    match next {
        Some(quest) => info!("Completed {} quest '{}', next is '{}'", Q::SOURCE, current, quest),
        None => info!("Completed {} quest '{}', chain finished", Q::SOURCE, current),
    }
    Ok(next)
}

/// The chain's active quest as a descriptor, if any.
pub fn list_available<Q: QuestChain>(state: &CampaignState, codex: &Codex) -> Option<QuestDescriptor> {
    Q::ledger(state)
        .active_quest
        .map(|quest| QuestDescriptor::lookup(Q::SOURCE, quest.id(), codex))
}

/// Hazard check for the Eye of Magnus.
///
/// True only while the Eye of Magnus is the active College quest and its
/// instability has reached [`DRAGONBREAK_INSTABILITY`]. Read-only; the gate
/// itself is enforced by the caller.
pub fn dragonbreak_precheck(state: &CampaignState) -> bool {
    state.college_state.active_quest() == Some(CollegeQuest::EyeOfMagnus)
        && state.college_state.eye_instability >= DRAGONBREAK_INSTABILITY
}

//! The story manager couples the stateless engines to persistence.
//!
//! Every mutating call takes the campaign document and a `save` flag, and
//! `save = true` always writes. Callers batching several mutations pass `false`
//! and save once at the end; callers with no preference pass
//! [`StoryManager::autosave`], the configured default.

use campaign_state::{
    Allegiance, CampaignConfig, CampaignState, Codex, CollegeQuest, HunterTier, StateStore,
};
use tracing::debug;

use crate::eligibility;
use crate::error::StoryError;
use crate::escalation::{self, ConfrontationOutcome, EscalationEvent};
use crate::quest_chain::{self, QuestChain, QuestDescriptor, QuestSource};
use crate::session_zero;
use crate::triggers;

/// Facade over the quest, escalation and trigger engines.
pub struct StoryManager {
    store: StateStore,
    codex: Codex,
    autosave: bool,
}

impl StoryManager {
    /// Create a manager over a store and reference data.
    pub fn new(store: StateStore, codex: Codex) -> Self {
        Self {
            store,
            codex,
            autosave: true,
        }
    }

    /// Build a manager from configuration, loading the codex from its data directory.
    pub fn from_config(config: &CampaignConfig) -> Result<Self, StoryError> {
        let codex = Codex::load(&config.data_dir)?;
        escalation::check_clock_definition(&codex);
        Ok(Self::new(config.store(), codex).with_autosave(config.autosave))
    }

    /// Set the default save flag.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn codex(&self) -> &Codex {
        &self.codex
    }

    /// Save flag for callers that do not batch.
    pub fn autosave(&self) -> bool {
        self.autosave
    }

    /// Load the campaign document.
    pub fn load_state(&self) -> Result<CampaignState, StoryError> {
        Ok(self.store.load()?)
    }

    /// Persist the campaign document unconditionally.
    pub fn save_state(&self, state: &CampaignState) -> Result<(), StoryError> {
        Ok(self.store.save(state)?)
    }

    fn persist_if(&self, state: &CampaignState, save: bool) -> Result<(), StoryError> {
        if save {
            self.save_state(state)?;
        } else {
            debug!("Deferring save of '{}'", state.campaign_id);
        }
        Ok(())
    }

    /// Initialise a new campaign. Returns the starting faction.
    pub fn begin_campaign(
        &self,
        state: &mut CampaignState,
        alliance: Allegiance,
        subfaction: Option<&str>,
        save: bool,
    ) -> Result<String, StoryError> {
        let faction = session_zero::begin_campaign(state, alliance, subfaction);
        self.persist_if(state, save)?;
        Ok(faction)
    }

    /// Start the College questline at First Lessons.
    pub fn start_college_questline(
        &self,
        state: &mut CampaignState,
        save: bool,
    ) -> Result<(), StoryError> {
        quest_chain::start(state, CollegeQuest::ROOT);
        self.persist_if(state, save)
    }

    /// Complete the active College quest. Returns the next one, if any.
    pub fn complete_college_quest(
        &self,
        state: &mut CampaignState,
        save: bool,
    ) -> Result<Option<CollegeQuest>, StoryError> {
        let next = quest_chain::complete_active::<CollegeQuest>(state)?;
        self.persist_if(state, save)?;
        Ok(next)
    }

    pub fn dragonbreak_precheck_college(&self, state: &CampaignState) -> bool {
        quest_chain::dragonbreak_precheck(state)
    }

    /// Quests currently on offer: the active College quest first, then every
    /// Silver Hand quest whose activation rule passes.
    pub fn available_quests(&self, state: &CampaignState) -> Vec<QuestDescriptor> {
        let college = quest_chain::list_available::<CollegeQuest>(state, &self.codex);
        let silver_hand = eligibility::eligible_quests(state)
            .into_iter()
            .map(|quest| QuestDescriptor::lookup(QuestSource::SilverHand, quest.as_str(), &self.codex));

        college.into_iter().chain(silver_hand).collect()
    }

    /// Raise (or lower) Silver Hand awareness. Returns newly unlocked tiers.
    pub fn increment_silver_hand_awareness(
        &self,
        state: &mut CampaignState,
        amount: i64,
        save: bool,
    ) -> Result<Vec<HunterTier>, StoryError> {
        let unlocked = escalation::increment(state, amount);
        self.persist_if(state, save)?;
        Ok(unlocked)
    }

    /// Reveal the Silver Hand headquarters if awareness is full.
    pub fn trigger_silver_hand_escalation(
        &self,
        state: &mut CampaignState,
        save: bool,
    ) -> Result<bool, StoryError> {
        let discovered = escalation::trigger_escalation(state);
        if discovered {
            self.persist_if(state, save)?;
        }
        Ok(discovered)
    }

    pub fn trigger_silver_hand_event(&self, state: &CampaignState) -> Option<EscalationEvent> {
        escalation::trigger_event(state)
    }

    /// Apply a confrontation outcome. Unknown keys are ignored and nothing is saved.
    pub fn record_silver_hand_outcome(
        &self,
        state: &mut CampaignState,
        outcome_key: &str,
        save: bool,
    ) -> Result<Option<ConfrontationOutcome>, StoryError> {
        let outcome = escalation::record_outcome(state, outcome_key);
        if outcome.is_some() {
            self.persist_if(state, save)?;
        }
        Ok(outcome)
    }

    pub fn check_silver_hand_quest_eligibility(&self, quest_id: &str, state: &CampaignState) -> bool {
        eligibility::check_eligibility(quest_id, state)
    }

    /// Narrative events for arriving at `location`.
    ///
    /// Saves only when a one-shot beat fired.
    pub fn location_events(
        &self,
        location: &str,
        state: &mut CampaignState,
        save: bool,
    ) -> Result<Vec<String>, StoryError> {
        let shown = state.scene_flags.len();
        let events = triggers::location_events(location, state);
        if state.scene_flags.len() != shown {
            self.persist_if(state, save)?;
        }
        Ok(events)
    }
}

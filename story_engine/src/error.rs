//! Errors surfaced by the story engines.

use campaign_state::StateError;
use thiserror::Error;

use crate::quest_chain::QuestSource;

/// Errors from engine calls and the persistence behind them.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A chain was asked to complete its active quest while none is active.
    #[error("no active quest in the {chain} chain")]
    NoActiveQuest { chain: QuestSource },

    #[error(transparent)]
    State(#[from] StateError),
}

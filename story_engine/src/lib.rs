//! # Story Engine
//!
//! The narrative state machine of the campaign. This crate operates on the
//! `campaign_state` document, advancing questlines, escalating faction threats
//! and deriving location-driven narration from the current state.
//!
//! ## Core Components
//!
//! - **quest_chain**: Ordered questline advancement (College of Winterhold)
//! - **escalation**: Bounded escalation clocks with tier unlocks (Silver Hand awareness)
//! - **eligibility**: Activation rules for dynamic quests
//! - **triggers**: Location-keyed narrative events with one-shot scene flags
//! - **session_zero**: Campaign-state initialisation for a new party
//! - **manager**: The [`StoryManager`] facade coupling engines to persistence
//!
//! ## Design Philosophy
//!
//! - **Explicit State**: Every engine call receives the campaign document; no engine holds state
//! - **Fail Closed**: Unknown quest, event or outcome ids yield false/none/no-op, never errors
//! - **Batched Persistence**: Mutations take a save flag so callers can persist once per batch

pub mod eligibility;
pub mod error;
pub mod escalation;
pub mod manager;
pub mod quest_chain;
pub mod session_zero;
pub mod triggers;

pub use eligibility::*;
pub use error::*;
pub use escalation::*;
pub use manager::*;
pub use quest_chain::*;
pub use session_zero::*;
pub use triggers::*;

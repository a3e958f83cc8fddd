//! # Campaign State
//!
//! The "campaign bible" crate - holds the persisted campaign document, the quest
//! identifiers it refers to, and the read-only reference data loaded alongside it.
//! This crate is the single source of truth for campaign state and contains no
//! narrative logic.
//!
//! ## Core Components
//!
//! - **document**: The typed campaign state document and its sub-blocks
//! - **quests**: Closed identifier sets for quest chains and dynamic quests
//! - **store**: Atomic load/save of the document on disk
//! - **codex**: Quest definitions read from the data directory
//! - **config**: TOML configuration for data and state locations

pub mod codex;
pub mod config;
pub mod document;
pub mod error;
mod lenient;
pub mod quests;
pub mod store;

pub use codex::*;
pub use config::*;
pub use document::*;
pub use error::*;
pub use quests::*;
pub use store::*;

//! Quest identifiers and per-chain progress bookkeeping.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::lenient;

/// The College of Winterhold questline, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollegeQuest {
    #[serde(rename = "college_first_lessons")]
    FirstLessons,
    #[serde(rename = "college_under_saarthal")]
    UnderSaarthal,
    #[serde(rename = "college_hitting_the_books")]
    HittingTheBooks,
    #[serde(rename = "college_revealing_the_unseen")]
    RevealingTheUnseen,
    #[serde(rename = "college_staff_of_magnus")]
    StaffOfMagnus,
    #[serde(rename = "college_eye_of_magnus")]
    EyeOfMagnus,
}

impl CollegeQuest {
    /// Every College quest in chain order.
    pub const ALL: [CollegeQuest; 6] = [
        CollegeQuest::FirstLessons,
        CollegeQuest::UnderSaarthal,
        CollegeQuest::HittingTheBooks,
        CollegeQuest::RevealingTheUnseen,
        CollegeQuest::StaffOfMagnus,
        CollegeQuest::EyeOfMagnus,
    ];

    /// The persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollegeQuest::FirstLessons => "college_first_lessons",
            CollegeQuest::UnderSaarthal => "college_under_saarthal",
            CollegeQuest::HittingTheBooks => "college_hitting_the_books",
            CollegeQuest::RevealingTheUnseen => "college_revealing_the_unseen",
            CollegeQuest::StaffOfMagnus => "college_staff_of_magnus",
            CollegeQuest::EyeOfMagnus => "college_eye_of_magnus",
        }
    }

    /// Look up a quest by its persisted identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|quest| quest.as_str() == id)
    }
}

impl fmt::Display for CollegeQuest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dynamic Silver Hand quests unlocked by awareness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SilverHandQuest {
    #[serde(rename = "silver_hand_hunt_the_beast")]
    HuntTheBeast,
    #[serde(rename = "silver_hand_siege_of_jorrvaskr")]
    SiegeOfJorrvaskr,
    #[serde(rename = "silver_hand_purification_ritual")]
    PurificationRitual,
    #[serde(rename = "silver_hand_high_purifier_showdown")]
    HighPurifierShowdown,
}

impl SilverHandQuest {
    pub const ALL: [SilverHandQuest; 4] = [
        SilverHandQuest::HuntTheBeast,
        SilverHandQuest::SiegeOfJorrvaskr,
        SilverHandQuest::PurificationRitual,
        SilverHandQuest::HighPurifierShowdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SilverHandQuest::HuntTheBeast => "silver_hand_hunt_the_beast",
            SilverHandQuest::SiegeOfJorrvaskr => "silver_hand_siege_of_jorrvaskr",
            SilverHandQuest::PurificationRitual => "silver_hand_purification_ritual",
            SilverHandQuest::HighPurifierShowdown => "silver_hand_high_purifier_showdown",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|quest| quest.as_str() == id)
    }
}

impl fmt::Display for SilverHandQuest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress status recorded per quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Active,
    Completed,
}

/// Progress through one quest chain: the active quest, what has been
/// completed (in completion order) and a status per touched quest.
///
/// Ids this build does not recognise are dropped on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "Q: DeserializeOwned + Ord"))]
pub struct QuestLedger<Q: Ord> {
    #[serde(deserialize_with = "lenient::known_option")]
    pub active_quest: Option<Q>,
    #[serde(deserialize_with = "lenient::known_entries")]
    pub completed_quests: Vec<Q>,
    #[serde(deserialize_with = "lenient::known_keys")]
    pub quest_progress: BTreeMap<Q, QuestStatus>,
}

impl<Q: Ord> Default for QuestLedger<Q> {
    fn default() -> Self {
        Self {
            active_quest: None,
            completed_quests: Vec::new(),
            quest_progress: BTreeMap::new(),
        }
    }
}

impl<Q: Ord + Copy> QuestLedger<Q> {
    /// Status of a quest, if it has been started.
    pub fn status(&self, quest: Q) -> Option<QuestStatus> {
        self.quest_progress.get(&quest).copied()
    }

    /// Check if a quest has been completed.
    pub fn is_completed(&self, quest: Q) -> bool {
        self.completed_quests.contains(&quest)
    }

    /// Record a quest as completed. Returns false if it already was.
    pub fn record_completed(&mut self, quest: Q) -> bool {
        self.quest_progress.insert(quest, QuestStatus::Completed);
        if self.completed_quests.contains(&quest) {
            return false;
        }
        self.completed_quests.push(quest);
        true
    }

    /// Make a quest the active one.
    pub fn activate(&mut self, quest: Q) {
        self.active_quest = Some(quest);
        self.quest_progress.insert(quest, QuestStatus::Active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_college_quest_ids() {
        assert_eq!(CollegeQuest::FirstLessons.as_str(), "college_first_lessons");
        assert_eq!(
            CollegeQuest::from_id("college_eye_of_magnus"),
            Some(CollegeQuest::EyeOfMagnus)
        );
        assert_eq!(CollegeQuest::from_id("first_lessons"), None);
    }

    #[test]
    fn test_quest_id_serde_matches_as_str() {
        for quest in CollegeQuest::ALL {
            let json = serde_json::to_string(&quest).unwrap();
            assert_eq!(json, format!("\"{}\"", quest.as_str()));
        }
        for quest in SilverHandQuest::ALL {
            let json = serde_json::to_string(&quest).unwrap();
            assert_eq!(json, format!("\"{}\"", quest.as_str()));
        }
    }

    #[test]
    fn test_ledger_completion_is_duplicate_free() {
        let mut ledger = QuestLedger::default();
        ledger.activate(CollegeQuest::FirstLessons);
        assert_eq!(
            ledger.status(CollegeQuest::FirstLessons),
            Some(QuestStatus::Active)
        );

        assert!(ledger.record_completed(CollegeQuest::FirstLessons));
        assert!(!ledger.record_completed(CollegeQuest::FirstLessons));
        assert_eq!(ledger.completed_quests, vec![CollegeQuest::FirstLessons]);
        assert_eq!(
            ledger.status(CollegeQuest::FirstLessons),
            Some(QuestStatus::Completed)
        );
    }

    #[test]
    fn test_ledger_json_shape() {
        let mut ledger = QuestLedger::default();
        ledger.activate(CollegeQuest::UnderSaarthal);
        ledger.record_completed(CollegeQuest::FirstLessons);

        let value = serde_json::to_value(&ledger).unwrap();
        assert_eq!(value["active_quest"], "college_under_saarthal");
        assert_eq!(value["completed_quests"][0], "college_first_lessons");
        assert_eq!(value["quest_progress"]["college_under_saarthal"], "active");
        assert_eq!(value["quest_progress"]["college_first_lessons"], "completed");

        let back: QuestLedger<CollegeQuest> = serde_json::from_value(value).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_ledger_drops_unrecognised_ids() {
        let ledger: QuestLedger<CollegeQuest> = serde_json::from_str(
            r#"{
                "active_quest": "college_midden_dark",
                "completed_quests": ["college_first_lessons", "college_midden_dark"],
                "quest_progress": {
                    "college_first_lessons": "completed",
                    "college_midden_dark": "active",
                    "college_under_saarthal": "abandoned"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(ledger.active_quest, None);
        assert_eq!(ledger.completed_quests, vec![CollegeQuest::FirstLessons]);
        assert_eq!(ledger.quest_progress.len(), 1);
        assert_eq!(
            ledger.status(CollegeQuest::FirstLessons),
            Some(QuestStatus::Completed)
        );
    }

    #[test]
    fn test_ledger_null_active_quest() {
        let ledger: QuestLedger<CollegeQuest> =
            serde_json::from_str(r#"{"active_quest": null}"#).unwrap();
        assert_eq!(ledger.active_quest, None);
    }
}

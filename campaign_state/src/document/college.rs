//! College of Winterhold progress.

use serde::{Deserialize, Serialize};

use crate::quests::{CollegeQuest, QuestLedger};

/// Upper bound for Eye of Magnus instability.
pub const EYE_INSTABILITY_MAX: u32 = 10;

/// The `college_state` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollegeState {
    /// Chain progress, stored inline as `active_quest`, `completed_quests`
    /// and `quest_progress`.
    #[serde(flatten)]
    pub chain: QuestLedger<CollegeQuest>,

    /// Instability of the Eye of Magnus, 0 to [`EYE_INSTABILITY_MAX`].
    pub eye_instability: u32,
    pub ancano_suspicion: i32,
    pub internal_politics: i32,
}

impl CollegeState {
    /// Currently active College quest.
    pub fn active_quest(&self) -> Option<CollegeQuest> {
        self.chain.active_quest
    }

    /// Shift eye instability by `delta`, clamped to its bounds.
    pub fn adjust_eye_instability(&mut self, delta: i32) -> u32 {
        let next = (self.eye_instability as i64 + delta as i64).clamp(0, EYE_INSTABILITY_MAX as i64);
        self.eye_instability = next as u32;
        self.eye_instability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::QuestStatus;

    #[test]
    fn test_eye_instability_is_clamped() {
        let mut college = CollegeState::default();
        assert_eq!(college.adjust_eye_instability(4), 4);
        assert_eq!(college.adjust_eye_instability(20), EYE_INSTABILITY_MAX);
        assert_eq!(college.adjust_eye_instability(-50), 0);
    }

    #[test]
    fn test_flat_json_layout() {
        let json = r#"{
            "active_quest": "college_first_lessons",
            "completed_quests": [],
            "quest_progress": {"college_first_lessons": "active"},
            "eye_instability": 2,
            "ancano_suspicion": 1,
            "internal_politics": 0
        }"#;

        let college: CollegeState = serde_json::from_str(json).unwrap();
        assert_eq!(college.active_quest(), Some(CollegeQuest::FirstLessons));
        assert_eq!(
            college.chain.status(CollegeQuest::FirstLessons),
            Some(QuestStatus::Active)
        );
        assert_eq!(college.eye_instability, 2);

        let value = serde_json::to_value(&college).unwrap();
        assert_eq!(value["active_quest"], "college_first_lessons");
        assert!(value.get("chain").is_none());
    }

    #[test]
    fn test_partial_block_defaults() {
        let college: CollegeState =
            serde_json::from_str(r#"{"active_quest": "college_eye_of_magnus", "eye_instability": 5}"#)
                .unwrap();
        assert_eq!(college.active_quest(), Some(CollegeQuest::EyeOfMagnus));
        assert!(college.chain.completed_quests.is_empty());
        assert_eq!(college.internal_politics, 0);
    }
}

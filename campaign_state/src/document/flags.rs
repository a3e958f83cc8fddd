//! One-shot scene flags.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Narrative beats that have already been shown.
///
/// Persisted as a `{beat: true}` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct SceneFlags {
    shown: BTreeSet<String>,
}

impl SceneFlags {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a beat has been shown.
    pub fn is_set(&self, beat: &str) -> bool {
        self.shown.contains(beat)
    }

    /// Mark a beat as shown. Returns true only the first time.
    pub fn mark(&mut self, beat: &str) -> bool {
        if self.shown.contains(beat) {
            return false;
        }
        self.shown.insert(beat.to_string())
    }

    /// Number of beats shown.
    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.shown.iter().map(String::as_str)
    }
}

impl From<BTreeMap<String, bool>> for SceneFlags {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self {
            shown: map
                .into_iter()
                .filter_map(|(beat, set)| set.then_some(beat))
                .collect(),
        }
    }
}

impl From<SceneFlags> for BTreeMap<String, bool> {
    fn from(flags: SceneFlags) -> Self {
        flags.shown.into_iter().map(|beat| (beat, true)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_only_once() {
        let mut flags = SceneFlags::new();
        assert!(!flags.is_set("winterhold_first_arrival"));
        assert!(flags.mark("winterhold_first_arrival"));
        assert!(!flags.mark("winterhold_first_arrival"));
        assert!(flags.is_set("winterhold_first_arrival"));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn test_false_entries_are_unset() {
        let flags: SceneFlags =
            serde_json::from_str(r#"{"college_bridge_first_time": true, "midden_seen": false}"#)
                .unwrap();
        assert!(flags.is_set("college_bridge_first_time"));
        assert!(!flags.is_set("midden_seen"));
    }

    #[test]
    fn test_serialised_as_mapping() {
        let mut flags = SceneFlags::new();
        flags.mark("saarthal_eye_of_magnus_hook");
        let value = serde_json::to_value(&flags).unwrap();
        assert_eq!(value["saarthal_eye_of_magnus_hook"], true);
    }
}

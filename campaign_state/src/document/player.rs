//! Player profile, normalised once when the document is read.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Rank shown for College members without an explicit rank.
pub const DEFAULT_COLLEGE_RANK: &str = "Member";

/// The `player` block.
///
/// The Staff of Cinders has been recorded three ways over the life of the
/// campaign files: an explicit flag, an entry in `artifacts`, or a line in
/// `inventory`. All three collapse into [`PlayerProfile::has_staff_of_cinders`]
/// on load, so the rest of the engine reads a single field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawPlayer")]
pub struct PlayerProfile {
    pub college_member: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_rank: Option<String>,
    pub has_staff_of_cinders: bool,
    pub artifacts: Vec<Value>,
    pub inventory: Vec<Value>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl PlayerProfile {
    /// College rank, falling back to [`DEFAULT_COLLEGE_RANK`].
    pub fn college_rank(&self) -> &str {
        self.college_rank.as_deref().unwrap_or(DEFAULT_COLLEGE_RANK)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawPlayer {
    college_member: Option<Value>,
    college_rank: Option<String>,
    has_staff_of_cinders: Option<Value>,
    artifacts: Vec<Value>,
    inventory: Vec<Value>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

impl From<RawPlayer> for PlayerProfile {
    fn from(raw: RawPlayer) -> Self {
        let staff_flag = raw.has_staff_of_cinders.as_ref().is_some_and(truthy);
        let staff_artifact = raw.artifacts.iter().any(|artifact| {
            let name = label(artifact).to_ascii_lowercase();
            name == "staff_of_cinders" || name == "staff of cinders"
        });
        let staff_in_inventory = raw
            .inventory
            .iter()
            .any(|item| label(item).to_ascii_lowercase().contains("staff of cinders"));

        Self {
            college_member: raw.college_member.as_ref().is_some_and(truthy),
            college_rank: raw.college_rank.filter(|rank| !rank.is_empty()),
            has_staff_of_cinders: staff_flag || staff_artifact || staff_in_inventory,
            artifacts: raw.artifacts,
            inventory: raw.inventory,
            extra: raw.extra,
        }
    }
}

fn label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PlayerProfile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_staff_from_explicit_flag() {
        assert!(parse(r#"{"has_staff_of_cinders": true}"#).has_staff_of_cinders);
    }

    #[test]
    fn test_staff_from_artifacts() {
        assert!(parse(r#"{"artifacts": ["Staff_Of_Cinders"]}"#).has_staff_of_cinders);
        assert!(parse(r#"{"artifacts": ["staff of cinders"]}"#).has_staff_of_cinders);
        assert!(!parse(r#"{"artifacts": ["staff of magnus"]}"#).has_staff_of_cinders);
    }

    #[test]
    fn test_staff_from_inventory() {
        let player = parse(r#"{"inventory": ["Heirloom: Staff of Cinders (worn)"]}"#);
        assert!(player.has_staff_of_cinders);
    }

    #[test]
    fn test_no_staff() {
        let player = parse(r#"{"inventory": ["iron dagger"], "artifacts": []}"#);
        assert!(!player.has_staff_of_cinders);
    }

    #[test]
    fn test_college_rank_default() {
        let player = parse(r#"{"college_member": true}"#);
        assert!(player.college_member);
        assert_eq!(player.college_rank(), DEFAULT_COLLEGE_RANK);

        let ranked = parse(r#"{"college_member": true, "college_rank": "Apprentice"}"#);
        assert_eq!(ranked.college_rank(), "Apprentice");
    }

    #[test]
    fn test_normalised_flag_is_written_back() {
        let player = parse(r#"{"artifacts": ["staff_of_cinders"], "name": "Ysolda"}"#);
        let value = serde_json::to_value(&player).unwrap();
        assert_eq!(value["has_staff_of_cinders"], true);
        assert_eq!(value["name"], "Ysolda");
        assert_eq!(value["artifacts"][0], "staff_of_cinders");
    }
}

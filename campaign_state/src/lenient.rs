//! Field deserializers that drop ids this build does not know.
//!
//! Documents written by newer tools may name quests or tiers missing from the
//! closed enums. Such entries are logged and skipped; the rest of the document
//! still loads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

fn known<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(known) => Some(known),
        Err(_) => {
            warn!("Dropping unrecognised entry {}", value);
            None
        }
    }
}

/// A list, keeping only entries that parse.
pub(crate) fn known_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.iter().filter_map(known).collect())
}

/// An optional id; an unrecognised one reads as absent.
pub(crate) fn known_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().filter(|v| !v.is_null()).and_then(known))
}

/// A map keyed by id, keeping only entries whose key and value both parse.
pub(crate) fn known_keys<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: DeserializeOwned + Ord,
    V: DeserializeOwned,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| Some((known(&Value::String(key))?, known(&value)?)))
        .collect())
}

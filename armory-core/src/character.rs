use serde::{Deserialize, Serialize};
use std::fmt;

use crate::progression::ProgressState;

/// Opaque character identifier.
///
/// Older saves wrote numeric ids; those are read back as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct CharacterId(String);

impl CharacterId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<CharacterId> for String {
    fn from(id: CharacterId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for CharacterId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

/// A tracked character and the progression it alone owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(flatten)]
    pub progress: ProgressState,
}

impl Character {
    #[must_use]
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            progress: ProgressState::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn character_round_trips_flat_record() {
        let raw = json!({
            "id": "c-1",
            "name": "Aerith",
            "progression": { "Monk": { "Relic": { "Hat": { "Hat +1": { "Seal": 2 } } } } },
            "completedUpgrades": {},
            "currentTiers": {}
        });
        let character: Character = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(character.id.as_str(), "c-1");
        assert_eq!(character.name, "Aerith");
        assert_eq!(serde_json::to_value(&character).unwrap(), raw);
    }

    #[test]
    fn numeric_ids_and_missing_trees_are_accepted() {
        let character: Character =
            serde_json::from_value(json!({ "id": 1_717_171_717_171_u64, "name": "Old" })).unwrap();
        assert_eq!(character.id, CharacterId::from("1717171717171"));
        assert!(character.progress.progression().is_empty());
    }
}

//! Persisted progression trees.
//!
//! All three trees share the same outer shape, job name then category name,
//! and are stored exactly the way the browser build has always written them.
//! Category keys stay plain strings so data for a category this build does
//! not know about still survives a load/save cycle.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::Requirement;

/// Stored state of a single requirement: a checkmark or a running count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementState {
    Flag(bool),
    Count(u32),
}

impl Default for RequirementState {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl RequirementState {
    /// A checkmark counts as one.
    #[must_use]
    pub const fn count(self) -> u32 {
        match self {
            Self::Flag(true) => 1,
            Self::Flag(false) => 0,
            Self::Count(n) => n,
        }
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        self.count() > 0
    }

    #[must_use]
    pub const fn satisfies(self, requirement: &Requirement) -> bool {
        self.count() >= requirement.target()
    }
}

/// Requirement key to stored state for one step.
pub type StepProgress = BTreeMap<String, RequirementState>;

/// Item name to step name to requirement progress.
pub type ItemProgress = BTreeMap<String, BTreeMap<String, StepProgress>>;

/// Item name to step name to completion flag.
pub type ItemCompletion = BTreeMap<String, BTreeMap<String, bool>>;

/// Base item name to the name of the tier currently equipped.
pub type TierPointers = BTreeMap<String, String>;

/// Two-level job/category map shared by every progression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobTree<T>(BTreeMap<String, BTreeMap<String, T>>);

pub type ProgressionTree = JobTree<ItemProgress>;
pub type CompletionTree = JobTree<ItemCompletion>;
pub type TierPointerTree = JobTree<TierPointers>;

impl<T> Default for JobTree<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<T> JobTree<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty tree has no job entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn section(&self, job: &str, category: &str) -> Option<&T> {
        self.0.get(job)?.get(category)
    }

    pub fn section_mut(&mut self, job: &str, category: &str) -> Option<&mut T> {
        self.0.get_mut(job)?.get_mut(category)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every job/category section, in key order.
    pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.values_mut().flat_map(BTreeMap::values_mut)
    }
}

impl<T: Default> JobTree<T> {
    /// Section for a job/category, created empty when absent.
    pub fn section_entry(&mut self, job: &str, category: &str) -> &mut T {
        self.0
            .entry(job.to_owned())
            .or_default()
            .entry(category.to_owned())
            .or_default()
    }
}

impl<T> From<BTreeMap<String, BTreeMap<String, T>>> for JobTree<T> {
    fn from(inner: BTreeMap<String, BTreeMap<String, T>>) -> Self {
        Self(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requirement_state_reads_flags_and_counts() {
        let progress: StepProgress = serde_json::from_value(json!({
            "Defeat the NM": true,
            "Ancient Beastcoin": 5,
            "Seal": false
        }))
        .unwrap();
        assert_eq!(progress["Defeat the NM"], RequirementState::Flag(true));
        assert_eq!(progress["Ancient Beastcoin"].count(), 5);
        assert!(!progress["Seal"].is_set());
        assert!(progress["Ancient Beastcoin"].satisfies(&Requirement::quantified("Coin", 5)));
        assert!(!progress["Ancient Beastcoin"].satisfies(&Requirement::quantified("Coin", 6)));
    }

    #[test]
    fn job_tree_keeps_unknown_categories() {
        let raw = json!({
            "Warrior": {
                "Artifact": { "Item A": "Item B" },
                "Mythic": { "Item X": "Item Y" }
            }
        });
        let tree: TierPointerTree = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            tree.section("Warrior", "Artifact").unwrap()["Item A"],
            "Item B"
        );
        assert_eq!(serde_json::to_value(&tree).unwrap(), raw);
    }

    #[test]
    fn section_entry_creates_missing_levels() {
        let mut tree = CompletionTree::new();
        assert!(tree.is_empty());
        tree.section_entry("Monk", "Relic")
            .entry("Hat".into())
            .or_default()
            .insert("Hat +1".into(), true);
        assert_eq!(tree.jobs().collect::<Vec<_>>(), vec!["Monk"]);
        assert!(tree.section("Monk", "Relic").is_some());
        assert!(tree.section("Monk", "Artifact").is_none());
    }
}

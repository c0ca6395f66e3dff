//! Character registry: the set of characters and which one is active.
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::character::{Character, CharacterId};
use crate::progress::{CompletionTree, ProgressionTree, TierPointerTree};
use crate::progression::ProgressState;

/// Name given to the character created from pre-character saves.
pub const LEGACY_CHARACTER_NAME: &str = "Default";

#[derive(Debug, Clone)]
pub struct CharacterRegistry {
    characters: Vec<Character>,
    selected: Option<CharacterId>,
    id_rng: ChaCha20Rng,
}

impl CharacterRegistry {
    #[must_use]
    pub fn new(id_seed: u64) -> Self {
        Self::from_parts(Vec::new(), None, id_seed)
    }

    /// Rebuild a registry from persisted parts. The selection is kept as-is,
    /// even if it names a character that no longer exists.
    #[must_use]
    pub fn from_parts(
        characters: Vec<Character>,
        selected: Option<CharacterId>,
        id_seed: u64,
    ) -> Self {
        Self {
            characters,
            selected,
            id_rng: ChaCha20Rng::seed_from_u64(id_seed),
        }
    }

    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub const fn selected_id(&self) -> Option<&CharacterId> {
        self.selected.as_ref()
    }

    /// The active character, or `None` when nothing (or a dangling id) is selected.
    #[must_use]
    pub fn selected(&self) -> Option<&Character> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Character> {
        let id = self.selected.as_ref()?;
        self.characters.iter_mut().find(|c| &c.id == id)
    }

    /// Create a character with empty progression and select it.
    pub fn add_character(&mut self, name: impl Into<String>) -> CharacterId {
        let id = self.fresh_id();
        self.characters.push(Character::new(id.clone(), name));
        self.selected = Some(id.clone());
        id
    }

    /// Delete a character. A removed selection falls back to the first
    /// remaining character. Returns whether a character was removed.
    pub fn remove_character(&mut self, id: &CharacterId) -> bool {
        let before = self.characters.len();
        self.characters.retain(|c| &c.id != id);
        if self.characters.len() == before {
            return false;
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = self.characters.first().map(|c| c.id.clone());
        }
        true
    }

    /// Returns whether a character with this id exists.
    pub fn rename_character(&mut self, id: &CharacterId, new_name: impl Into<String>) -> bool {
        match self.characters.iter_mut().find(|c| &c.id == id) {
            Some(character) => {
                character.name = new_name.into();
                true
            }
            None => false,
        }
    }

    /// Select by id without checking that the character exists.
    pub fn select_character(&mut self, id: CharacterId) {
        self.selected = Some(id);
    }

    /// Wrap the pre-character global trees in a single "Default" character.
    ///
    /// Only runs while the registry is empty and at least one tree holds data.
    /// Returns whether a character was created.
    pub fn migrate_legacy_state(
        &mut self,
        progression: ProgressionTree,
        completed_upgrades: CompletionTree,
        current_tiers: TierPointerTree,
    ) -> bool {
        if !self.characters.is_empty() {
            return false;
        }
        if progression.is_empty() && completed_upgrades.is_empty() && current_tiers.is_empty() {
            return false;
        }
        let id = self.fresh_id();
        let mut progress = ProgressState::from_trees(progression, completed_upgrades, current_tiers);
        progress.key_completions_by_step();
        self.characters.push(Character {
            id: id.clone(),
            name: LEGACY_CHARACTER_NAME.to_owned(),
            progress,
        });
        self.selected = Some(id);
        true
    }

    fn fresh_id(&mut self) -> CharacterId {
        loop {
            let id = CharacterId::new(format!("{:016x}", self.id_rng.next_u64()));
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl Default for CharacterRegistry {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_selects_new_character_with_unique_ids() {
        let mut registry = CharacterRegistry::new(7);
        let first = registry.add_character("Alpha");
        let second = registry.add_character("Alpha");
        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.selected_id(), Some(&second));
        assert!(registry.selected().unwrap().progress == ProgressState::new());
    }

    #[test]
    fn removing_selected_falls_back_to_first() {
        let mut registry = CharacterRegistry::new(1);
        let a = registry.add_character("A");
        let b = registry.add_character("B");
        let c = registry.add_character("C");
        registry.select_character(b.clone());

        assert!(registry.remove_character(&b));
        assert_eq!(registry.selected_id(), Some(&a));
        assert!(registry.remove_character(&c));
        assert_eq!(registry.selected_id(), Some(&a));
        assert!(registry.remove_character(&a));
        assert_eq!(registry.selected_id(), None);
        assert!(!registry.remove_character(&a));
    }

    #[test]
    fn rename_is_noop_for_unknown_id() {
        let mut registry = CharacterRegistry::new(2);
        let id = registry.add_character("Old");
        assert!(registry.rename_character(&id, "New"));
        assert_eq!(registry.get(&id).unwrap().name, "New");
        assert!(!registry.rename_character(&CharacterId::from("ghost"), "Nobody"));
    }

    #[test]
    fn dangling_selection_has_no_active_character() {
        let mut registry = CharacterRegistry::new(3);
        registry.add_character("Real");
        registry.select_character(CharacterId::from("ghost"));
        assert!(registry.selected().is_none());
        assert!(registry.selected_mut().is_none());
    }

    #[test]
    fn legacy_migration_runs_once() {
        let mut registry = CharacterRegistry::new(4);
        let progression: ProgressionTree = serde_json::from_value(json!({
            "Warrior": { "Artifact": { "Mask": { "Mask +1": { "Seal": true } } } }
        }))
        .unwrap();
        assert!(registry.migrate_legacy_state(
            progression.clone(),
            CompletionTree::new(),
            TierPointerTree::new()
        ));
        assert_eq!(registry.len(), 1);
        let migrated = registry.selected().unwrap();
        assert_eq!(migrated.name, LEGACY_CHARACTER_NAME);
        assert_eq!(migrated.progress.progression(), &progression);

        assert!(!registry.migrate_legacy_state(
            progression,
            CompletionTree::new(),
            TierPointerTree::new()
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_legacy_state_does_not_migrate() {
        let mut registry = CharacterRegistry::new(5);
        assert!(!registry.migrate_legacy_state(
            ProgressionTree::new(),
            CompletionTree::new(),
            TierPointerTree::new()
        ));
        assert!(registry.is_empty());
    }
}

//! Tracker facade: a character registry bound to a key-value store.
//!
//! Every public operation targets the selected character. When no character
//! is selected (or the selection is dangling) queries return empty defaults
//! and mutations succeed without doing anything, so a UI can render before
//! the first character exists.
//!
//! Mutations write through to the store immediately. An `Err` from a mutation
//! means the in-memory state changed but could not be persisted; the session
//! keeps working from memory.
use serde::{Deserialize, Serialize};

use crate::catalog::{ArmorCategory, Requirement};
use crate::character::{Character, CharacterId};
use crate::progress::{
    CompletionTree, ProgressionTree, StepProgress, TierPointerTree, TierPointers,
};
use crate::progression::{CompletionOutcome, ProgressState};
use crate::registry::{CharacterRegistry, LEGACY_CHARACTER_NAME};
use crate::storage::{self, KeyValueStore, LoadedRecords, StorageError};

/// Keys under which tracker state is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub characters: String,
    /// Receives the stored character list when some records could not be read.
    pub characters_backup: String,
    pub selected_character: String,
    pub legacy_progression: String,
    pub legacy_completed_upgrades: String,
    pub legacy_current_tiers: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            characters: "ffxi-characters".to_owned(),
            characters_backup: "ffxi-characters-backup".to_owned(),
            selected_character: "ffxi-selected-character".to_owned(),
            legacy_progression: "ffxi-armor-progression".to_owned(),
            legacy_completed_upgrades: "ffxi-completed-upgrades".to_owned(),
            legacy_current_tiers: "ffxi-current-tiers".to_owned(),
        }
    }
}

impl StorageKeys {
    fn legacy(&self) -> [&str; 3] {
        [
            &self.legacy_progression,
            &self.legacy_completed_upgrades,
            &self.legacy_current_tiers,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub keys: StorageKeys,
    /// Seed for generating character ids.
    #[serde(default)]
    pub id_seed: u64,
}

impl TrackerConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_id_seed(mut self, id_seed: u64) -> Self {
        self.id_seed = id_seed;
        self
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Addresses one upgrade step of one item.
///
/// Checklists are stored under the step's own name in both positions; see
/// [`StepTarget::step`]. For completion, `item` names the base or held item
/// whose tier pointer advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTarget {
    pub job: String,
    pub category: ArmorCategory,
    pub item: String,
    pub step: String,
}

impl StepTarget {
    #[must_use]
    pub fn new(
        job: impl Into<String>,
        category: ArmorCategory,
        item: impl Into<String>,
        step: impl Into<String>,
    ) -> Self {
        Self {
            job: job.into(),
            category,
            item: item.into(),
            step: step.into(),
        }
    }

    /// Target keyed by the step name alone, the way checklists are stored.
    #[must_use]
    pub fn step(job: impl Into<String>, category: ArmorCategory, step: impl Into<String>) -> Self {
        let step = step.into();
        Self::new(job, category, step.clone(), step)
    }
}

/// A user command, as dispatched by the UI or a scripted scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    AddCharacter {
        name: String,
    },
    RemoveCharacter {
        id: CharacterId,
    },
    RenameCharacter {
        id: CharacterId,
        name: String,
    },
    SelectCharacter {
        id: CharacterId,
    },
    ToggleRequirement {
        target: StepTarget,
        requirement: String,
    },
    SetRequirementCount {
        target: StepTarget,
        requirement: String,
        count: u32,
    },
    IncrementRequirement {
        target: StepTarget,
        requirement: String,
    },
    DecrementRequirement {
        target: StepTarget,
        requirement: String,
    },
    /// Checked completion: only applies when `requirements` are all satisfied.
    CompleteUpgrade {
        target: StepTarget,
        next_tier: Option<String>,
        requirements: Vec<Requirement>,
    },
    /// Reset `item` and every listed step of its chain.
    ResetProgress {
        job: String,
        category: ArmorCategory,
        item: String,
        #[serde(default)]
        steps: Vec<String>,
    },
}

pub struct Tracker<S>
where
    S: KeyValueStore,
{
    store: S,
    keys: StorageKeys,
    registry: CharacterRegistry,
}

impl<S> Tracker<S>
where
    S: KeyValueStore,
{
    /// Load persisted state, migrating a pre-character save if one is found.
    ///
    /// Character records that cannot be decoded are dropped from the session
    /// and the stored list is first copied to `keys.characters_backup`.
    /// Other unreadable values are treated as empty; persistence failures
    /// during migration are logged and the migrated state is kept in memory.
    pub fn load(store: S, config: TrackerConfig) -> Self {
        let keys = config.keys;
        let loaded: LoadedRecords<Character> = storage::load_records(&store, &keys.characters);
        if let Some(raw) = loaded.raw.as_deref() {
            match store.write(&keys.characters_backup, raw) {
                Ok(()) => log::warn!(
                    "{} unreadable character records, stored list copied to '{}'",
                    loaded.skipped,
                    keys.characters_backup
                ),
                Err(err) => log::error!("could not back up '{}': {err}", keys.characters),
            }
        }
        let mut characters = loaded.records;
        for character in &mut characters {
            character.progress.key_completions_by_step();
        }
        let selected: Option<CharacterId> =
            storage::load_or_default(&store, &keys.selected_character);
        log::debug!("loaded {} characters", characters.len());

        let mut tracker = Self {
            registry: CharacterRegistry::from_parts(characters, selected, config.id_seed),
            store,
            keys,
        };
        if let Err(err) = tracker.migrate_legacy_state() {
            log::warn!("legacy progression migrated but not persisted: {err}");
        }
        tracker
    }

    /// Move legacy global trees into a "Default" character.
    ///
    /// A no-op once any character exists. On success the legacy keys are
    /// overwritten with empty trees. Returns whether a migration happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the migrated character or the cleared legacy
    /// values cannot be written. Legacy values are only cleared after the
    /// character list was written.
    pub fn migrate_legacy_state(&mut self) -> Result<bool, StorageError> {
        if !self.registry.is_empty() {
            return Ok(false);
        }
        let progression: ProgressionTree =
            storage::load_or_default(&self.store, &self.keys.legacy_progression);
        let completed: CompletionTree =
            storage::load_or_default(&self.store, &self.keys.legacy_completed_upgrades);
        let tiers: TierPointerTree =
            storage::load_or_default(&self.store, &self.keys.legacy_current_tiers);
        if !self
            .registry
            .migrate_legacy_state(progression, completed, tiers)
        {
            return Ok(false);
        }
        log::info!("migrated legacy progression into character \"{LEGACY_CHARACTER_NAME}\"");

        self.persist_characters()?;
        self.persist_selection()?;
        let empty = serde_json::Map::new();
        for key in self.keys.legacy() {
            storage::save(&self.store, key, &empty)?;
        }
        Ok(true)
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    #[must_use]
    pub const fn registry(&self) -> &CharacterRegistry {
        &self.registry
    }

    #[must_use]
    pub fn characters(&self) -> &[Character] {
        self.registry.characters()
    }

    #[must_use]
    pub const fn selected_character_id(&self) -> Option<&CharacterId> {
        self.registry.selected_id()
    }

    #[must_use]
    pub fn selected_character(&self) -> Option<&Character> {
        self.registry.selected()
    }

    /// Progression of the active character.
    #[must_use]
    pub fn progress(&self) -> Option<&ProgressState> {
        self.registry.selected().map(|c| &c.progress)
    }

    // ---- character registry -------------------------------------------------

    /// Add and select a character. The new character stays selected even if
    /// persisting it fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the character list or selection cannot be written.
    pub fn add_character(&mut self, name: impl Into<String>) -> Result<CharacterId, StorageError> {
        let id = self.registry.add_character(name);
        self.persist_characters()?;
        self.persist_selection()?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns an error if the character list or selection cannot be written.
    pub fn remove_character(&mut self, id: &CharacterId) -> Result<(), StorageError> {
        if self.registry.remove_character(id) {
            self.persist_characters()?;
            self.persist_selection()?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the character list cannot be written.
    pub fn rename_character(
        &mut self,
        id: &CharacterId,
        new_name: impl Into<String>,
    ) -> Result<(), StorageError> {
        if self.registry.rename_character(id, new_name) {
            self.persist_characters()?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the selection cannot be written.
    pub fn select_character(&mut self, id: CharacterId) -> Result<(), StorageError> {
        self.registry.select_character(id);
        self.persist_selection()
    }

    // ---- queries ------------------------------------------------------------

    /// Empty when no character is active.
    #[must_use]
    pub fn get_step_progress(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
    ) -> StepProgress {
        self.progress()
            .map(|p| p.get_step_progress(job, category, item, step))
            .unwrap_or_default()
    }

    /// Zero when no character is active.
    #[must_use]
    pub fn calculate_progress(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirements: &[Requirement],
    ) -> f64 {
        self.progress().map_or(0.0, |p| {
            p.calculate_progress(job, category, item, step, requirements)
        })
    }

    /// False when no character is active.
    #[must_use]
    pub fn is_upgrade_complete(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
    ) -> bool {
        self.progress()
            .is_some_and(|p| p.is_upgrade_complete(job, category, item, step))
    }

    #[must_use]
    pub fn current_tier(&self, job: &str, category: ArmorCategory, base_item: &str) -> Option<&str> {
        self.progress()?.current_tier(job, category, base_item)
    }

    #[must_use]
    pub fn current_tiers(&self, job: &str, category: ArmorCategory) -> Option<&TierPointers> {
        self.progress()?.tier_pointers(job, category)
    }

    /// `item` itself when no character is active.
    #[must_use]
    pub fn resolve_base_item(&self, job: &str, category: ArmorCategory, item: &str) -> String {
        self.progress().map_or_else(
            || item.to_owned(),
            |p| p.resolve_base_item(job, category, item),
        )
    }

    // ---- progression mutations ----------------------------------------------

    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn toggle_requirement(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
    ) -> Result<(), StorageError> {
        self.mutate_selected(|p| {
            p.toggle_requirement(job, category, item, step, requirement);
        })
    }

    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn set_requirement_count(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
        count: u32,
    ) -> Result<(), StorageError> {
        self.mutate_selected(|p| {
            p.set_requirement_count(job, category, item, step, requirement, count);
        })
    }

    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn increment_requirement_count(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
    ) -> Result<(), StorageError> {
        self.mutate_selected(|p| {
            p.increment_requirement_count(job, category, item, step, requirement);
        })
    }

    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn decrement_requirement_count(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
    ) -> Result<(), StorageError> {
        self.mutate_selected(|p| {
            p.decrement_requirement_count(job, category, item, step, requirement);
        })
    }

    /// Unchecked completion; see [`ProgressState::complete_upgrade`].
    ///
    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn complete_upgrade(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        next_tier: Option<&str>,
    ) -> Result<(), StorageError> {
        self.mutate_selected(|p| p.complete_upgrade(job, category, item, step, next_tier))
    }

    /// Completion that refuses to finalize unsatisfied steps. Nothing is
    /// written unless the step actually completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn try_complete_upgrade(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        next_tier: Option<&str>,
        requirements: &[Requirement],
    ) -> Result<CompletionOutcome, StorageError> {
        let Some(character) = self.registry.selected_mut() else {
            return Ok(CompletionOutcome::NoActiveCharacter);
        };
        let outcome =
            character
                .progress
                .try_complete_upgrade(job, category, item, step, next_tier, requirements);
        if outcome == CompletionOutcome::Completed {
            self.persist_characters()?;
        }
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn reset_progress(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
    ) -> Result<(), StorageError> {
        self.mutate_selected(|p| {
            p.reset_progress(job, category, item);
        })
    }

    /// Reset a base item and the listed steps of its upgrade chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated character list cannot be written.
    pub fn reset_item(
        &mut self,
        job: &str,
        category: ArmorCategory,
        base_item: &str,
        steps: &[String],
    ) -> Result<(), StorageError> {
        self.mutate_selected(|p| {
            p.reset_item(job, category, base_item, steps.iter().map(String::as_str));
        })
    }

    /// Dispatch a user command.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting state cannot be written.
    pub fn apply(&mut self, action: Action) -> Result<(), StorageError> {
        match action {
            Action::AddCharacter { name } => self.add_character(name).map(|_| ()),
            Action::RemoveCharacter { id } => self.remove_character(&id),
            Action::RenameCharacter { id, name } => self.rename_character(&id, name),
            Action::SelectCharacter { id } => self.select_character(id),
            Action::ToggleRequirement { target, requirement } => self.toggle_requirement(
                &target.job,
                target.category,
                &target.item,
                &target.step,
                &requirement,
            ),
            Action::SetRequirementCount {
                target,
                requirement,
                count,
            } => self.set_requirement_count(
                &target.job,
                target.category,
                &target.item,
                &target.step,
                &requirement,
                count,
            ),
            Action::IncrementRequirement { target, requirement } => self
                .increment_requirement_count(
                    &target.job,
                    target.category,
                    &target.item,
                    &target.step,
                    &requirement,
                ),
            Action::DecrementRequirement { target, requirement } => self
                .decrement_requirement_count(
                    &target.job,
                    target.category,
                    &target.item,
                    &target.step,
                    &requirement,
                ),
            Action::CompleteUpgrade {
                target,
                next_tier,
                requirements,
            } => {
                let outcome = self.try_complete_upgrade(
                    &target.job,
                    target.category,
                    &target.item,
                    &target.step,
                    next_tier.as_deref(),
                    &requirements,
                )?;
                if outcome != CompletionOutcome::Completed {
                    log::debug!("upgrade '{}' not completed: {outcome:?}", target.step);
                }
                Ok(())
            }
            Action::ResetProgress {
                job,
                category,
                item,
                steps,
            } => self.reset_item(&job, category, &item, &steps),
        }
    }

    fn mutate_selected<F>(&mut self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut ProgressState),
    {
        let Some(character) = self.registry.selected_mut() else {
            return Ok(());
        };
        apply(&mut character.progress);
        self.persist_characters()
    }

    fn persist_characters(&self) -> Result<(), StorageError> {
        storage::save(&self.store, &self.keys.characters, self.registry.characters())
            .inspect_err(|err| log::warn!("characters not saved: {err}"))
    }

    fn persist_selection(&self) -> Result<(), StorageError> {
        storage::save(
            &self.store,
            &self.keys.selected_character,
            &self.registry.selected_id(),
        )
        .inspect_err(|err| log::warn!("selected character not saved: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const CAT: ArmorCategory = ArmorCategory::Relic;

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::load(MemoryStore::new(), TrackerConfig::default_config())
    }

    #[test]
    fn operations_without_character_are_safe_defaults() {
        let mut tracker = tracker();
        tracker
            .toggle_requirement("Monk", CAT, "Hat +1", "Hat +1", "Seal")
            .unwrap();
        tracker
            .complete_upgrade("Monk", CAT, "Hat", "Hat +1", Some("Hat +1"))
            .unwrap();
        tracker.reset_progress("Monk", CAT, "Hat").unwrap();

        assert!(tracker.get_step_progress("Monk", CAT, "Hat +1", "Hat +1").is_empty());
        assert!(!tracker.is_upgrade_complete("Monk", CAT, "Hat +1", "Hat +1"));
        assert!(tracker.calculate_progress("Monk", CAT, "Hat +1", "Hat +1", &[]) == 0.0);
        assert_eq!(tracker.resolve_base_item("Monk", CAT, "Hat +1"), "Hat +1");
        assert!(tracker.store().raw(&tracker.keys().characters).is_none());
        assert_eq!(
            tracker
                .try_complete_upgrade("Monk", CAT, "Hat", "Hat +1", None, &[])
                .unwrap(),
            CompletionOutcome::NoActiveCharacter
        );
    }

    #[test]
    fn mutations_write_through() {
        let mut tracker = tracker();
        let id = tracker.add_character("Shantotto").unwrap();
        tracker
            .increment_requirement_count("Black Mage", CAT, "Coat +1", "Coat +1", "Byne Bill")
            .unwrap();

        let reloaded = Tracker::load(tracker.store().clone(), TrackerConfig::default_config());
        assert_eq!(reloaded.selected_character_id(), Some(&id));
        assert_eq!(
            reloaded.get_step_progress("Black Mage", CAT, "Coat +1", "Coat +1")["Byne Bill"].count(),
            1
        );
    }

    #[test]
    fn persistence_failure_keeps_memory_state() {
        let mut tracker = tracker();
        tracker.add_character("Ayame").unwrap();
        tracker.store().set_fail_writes(true);
        let err = tracker
            .toggle_requirement("Samurai", CAT, "Kabuto +1", "Kabuto +1", "Seal")
            .unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
        assert!(
            tracker.get_step_progress("Samurai", CAT, "Kabuto +1", "Kabuto +1")["Seal"].is_set()
        );
    }

    #[test]
    fn actions_dispatch_to_operations() {
        let mut tracker = tracker();
        tracker
            .apply(Action::AddCharacter {
                name: "Prishe".into(),
            })
            .unwrap();
        let checklist = StepTarget::step("Monk", CAT, "Hat +1");
        let completion = StepTarget::new("Monk", CAT, "Hat", "Hat +1");
        let requirements = vec![Requirement::quantified("Seal", 2)];
        tracker
            .apply(Action::IncrementRequirement {
                target: checklist.clone(),
                requirement: "Seal".into(),
            })
            .unwrap();
        tracker
            .apply(Action::CompleteUpgrade {
                target: completion.clone(),
                next_tier: Some("Hat +1".into()),
                requirements: requirements.clone(),
            })
            .unwrap();
        assert!(!tracker.is_upgrade_complete("Monk", CAT, "Hat +1", "Hat +1"));

        tracker
            .apply(Action::SetRequirementCount {
                target: checklist,
                requirement: "Seal".into(),
                count: 2,
            })
            .unwrap();
        tracker
            .apply(Action::CompleteUpgrade {
                target: completion,
                next_tier: Some("Hat +1".into()),
                requirements,
            })
            .unwrap();
        assert!(tracker.is_upgrade_complete("Monk", CAT, "Hat +1", "Hat +1"));
        assert_eq!(tracker.current_tier("Monk", CAT, "Hat"), Some("Hat +1"));

        tracker
            .apply(Action::ResetProgress {
                job: "Monk".into(),
                category: CAT,
                item: "Hat".into(),
                steps: vec!["Hat +1".into(), "Hat +2".into()],
            })
            .unwrap();
        assert!(!tracker.is_upgrade_complete("Monk", CAT, "Hat +1", "Hat +1"));
        assert_eq!(tracker.current_tier("Monk", CAT, "Hat"), None);
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: Action = serde_json::from_str(
            r#"{ "type": "toggle_requirement",
                 "target": { "job": "Monk", "category": "Relic", "item": "Hat", "step": "Hat +1" },
                 "requirement": "Seal" }"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::ToggleRequirement {
                target: StepTarget::new("Monk", CAT, "Hat", "Hat +1"),
                requirement: "Seal".into(),
            }
        );
    }

    #[test]
    fn reset_action_steps_default_to_empty() {
        let action: Action = serde_json::from_str(
            r#"{ "type": "reset_progress", "job": "Monk", "category": "Relic", "item": "Hat" }"#,
        )
        .unwrap();
        assert!(matches!(action, Action::ResetProgress { ref steps, .. } if steps.is_empty()));
    }

    #[test]
    fn unreadable_character_does_not_erase_the_rest() {
        let keys = StorageKeys::default();
        let stored = r#"[
            {"id":"a","name":"Good","progression":{"Monk":{"Relic":{"Hat +1":{"Hat +1":{"Seal":true}}}}}},
            {"id":"b","name":"Bad","progression":{"Monk":{"Relic":{"Hat +1":{"Hat +1":{"Coin":null}}}}}}
        ]"#;
        let store = MemoryStore::with_entries([(keys.characters.as_str(), stored)]);
        let mut tracker = Tracker::load(store, TrackerConfig::default_config());
        assert_eq!(tracker.characters().len(), 1);
        assert_eq!(tracker.characters()[0].name, "Good");
        assert_eq!(
            tracker.store().raw(&keys.characters_backup).as_deref(),
            Some(stored)
        );

        tracker.add_character("New").unwrap();
        let saved: Vec<Character> =
            serde_json::from_str(&tracker.store().raw(&keys.characters).unwrap()).unwrap();
        let names: Vec<&str> = saved.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Good", "New"]);
        assert!(
            saved[0]
                .progress
                .requirement_state("Monk", CAT, "Hat +1", "Hat +1", "Seal")
                .is_set()
        );
        assert_eq!(
            tracker.store().raw(&keys.characters_backup).as_deref(),
            Some(stored)
        );
    }

    #[test]
    fn clean_load_writes_no_backup() {
        let mut tracker = tracker();
        tracker.add_character("Lilisette").unwrap();
        let reloaded = Tracker::load(tracker.store().clone(), TrackerConfig::default_config());
        assert_eq!(reloaded.characters().len(), 1);
        assert!(reloaded.store().raw(&reloaded.keys().characters_backup).is_none());
    }

    #[test]
    fn config_fills_missing_keys() {
        let config = TrackerConfig::from_json(r#"{ "keys": { "characters": "alt-chars" } }"#).unwrap();
        assert_eq!(config.keys.characters, "alt-chars");
        assert_eq!(config.keys.selected_character, "ffxi-selected-character");
        assert_eq!(config.keys.characters_backup, "ffxi-characters-backup");
        assert_eq!(config.id_seed, 0);
    }
}

//! Progression engine: requirement tracking and tier advancement.
//!
//! [`ProgressState`] owns the three trees of one character. Every mutating
//! method updates all affected trees before returning, so a reader never sees
//! a step marked complete while its checklist or tier pointer lags behind.
use serde::{Deserialize, Serialize};

use crate::catalog::{ArmorCategory, Requirement};
use crate::progress::{
    CompletionTree, ProgressionTree, RequirementState, StepProgress, TierPointerTree, TierPointers,
};

/// Completion percentage of a step, in `0.0..=100.0`.
///
/// Binary requirements count fully once set; quantified requirements count
/// `min(count / target, 1)`. A step without requirements reports zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_percent(progress: Option<&StepProgress>, requirements: &[Requirement]) -> f64 {
    if requirements.is_empty() {
        return 0.0;
    }
    let earned: f64 = requirements
        .iter()
        .map(|req| {
            let state = progress
                .and_then(|p| p.get(req.key()))
                .copied()
                .unwrap_or_default();
            match req {
                Requirement::Binary { .. } => {
                    if state.is_set() {
                        1.0
                    } else {
                        0.0
                    }
                }
                Requirement::Quantified { target, .. } => {
                    (f64::from(state.count()) / f64::from(*target)).min(1.0)
                }
            }
        })
        .sum();
    earned / requirements.len() as f64 * 100.0
}

/// Outcome of a checked completion attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionOutcome {
    Completed,
    AlreadyComplete,
    /// Requirements are not all satisfied yet; nothing changed.
    Incomplete { percent: f64 },
    NoActiveCharacter,
}

/// The progression trees owned by a single character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    #[serde(default)]
    progression: ProgressionTree,
    #[serde(default)]
    completed_upgrades: CompletionTree,
    #[serde(default)]
    current_tiers: TierPointerTree,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn from_trees(
        progression: ProgressionTree,
        completed_upgrades: CompletionTree,
        current_tiers: TierPointerTree,
    ) -> Self {
        Self {
            progression,
            completed_upgrades,
            current_tiers,
        }
    }

    #[must_use]
    pub const fn progression(&self) -> &ProgressionTree {
        &self.progression
    }

    #[must_use]
    pub const fn completed_upgrades(&self) -> &CompletionTree {
        &self.completed_upgrades
    }

    #[must_use]
    pub const fn current_tiers(&self) -> &TierPointerTree {
        &self.current_tiers
    }

    /// Tier pointers for one job/category.
    #[must_use]
    pub fn tier_pointers(&self, job: &str, category: ArmorCategory) -> Option<&TierPointers> {
        self.current_tiers.section(job, category.as_str())
    }

    fn step_progress(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
    ) -> Option<&StepProgress> {
        self.progression
            .section(job, category.as_str())?
            .get(item)?
            .get(step)
    }

    fn step_entry(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
    ) -> &mut StepProgress {
        self.progression
            .section_entry(job, category.as_str())
            .entry(item.to_owned())
            .or_default()
            .entry(step.to_owned())
            .or_default()
    }

    /// Stored progress for a step, empty when nothing was recorded.
    #[must_use]
    pub fn get_step_progress(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
    ) -> StepProgress {
        self.step_progress(job, category, item, step)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn requirement_state(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
    ) -> RequirementState {
        self.step_progress(job, category, item, step)
            .and_then(|progress| progress.get(requirement))
            .copied()
            .unwrap_or_default()
    }

    /// Flip a binary requirement. Returns the new value.
    pub fn toggle_requirement(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
    ) -> bool {
        let slot = self
            .step_entry(job, category, item, step)
            .entry(requirement.to_owned())
            .or_default();
        let next = !slot.is_set();
        *slot = RequirementState::Flag(next);
        next
    }

    pub fn set_requirement_count(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
        count: u32,
    ) {
        self.step_entry(job, category, item, step)
            .insert(requirement.to_owned(), RequirementState::Count(count));
    }

    /// Add one to a quantified requirement. Counts may run past the target.
    pub fn increment_requirement_count(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
    ) -> u32 {
        let slot = self
            .step_entry(job, category, item, step)
            .entry(requirement.to_owned())
            .or_default();
        let next = slot.count().saturating_add(1);
        *slot = RequirementState::Count(next);
        next
    }

    /// Subtract one from a quantified requirement, stopping at zero.
    pub fn decrement_requirement_count(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirement: &str,
    ) -> u32 {
        let slot = self
            .step_entry(job, category, item, step)
            .entry(requirement.to_owned())
            .or_default();
        let next = slot.count().saturating_sub(1);
        *slot = RequirementState::Count(next);
        next
    }

    #[must_use]
    pub fn calculate_progress(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        requirements: &[Requirement],
    ) -> f64 {
        progress_percent(self.step_progress(job, category, item, step), requirements)
    }

    #[must_use]
    pub fn is_upgrade_complete(
        &self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
    ) -> bool {
        self.completed_upgrades
            .section(job, category.as_str())
            .and_then(|items| items.get(item))
            .and_then(|steps| steps.get(step))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn current_tier(&self, job: &str, category: ArmorCategory, base_item: &str) -> Option<&str> {
        self.tier_pointers(job, category)?
            .get(base_item)
            .map(String::as_str)
    }

    /// Base item whose tier pointer currently names `item`, or `item` itself.
    #[must_use]
    pub fn resolve_base_item(&self, job: &str, category: ArmorCategory, item: &str) -> String {
        self.tier_pointers(job, category)
            .and_then(|pointers| {
                pointers
                    .iter()
                    .find(|(_, current)| current.as_str() == item)
                    .map(|(base, _)| base.clone())
            })
            .unwrap_or_else(|| item.to_owned())
    }

    /// Finalize a step.
    ///
    /// `item` is the base item or the tier currently held; it only decides
    /// whose tier pointer moves to `next_tier`. The step itself is keyed by
    /// its own name: it is marked complete and its checklist is dropped.
    pub fn complete_upgrade(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        next_tier: Option<&str>,
    ) {
        let cat = category.as_str();
        let next_tier = next_tier.filter(|name| !name.is_empty());
        let base = next_tier.map(|_| self.resolve_base_item(job, category, item));

        self.completed_upgrades
            .section_entry(job, cat)
            .entry(step.to_owned())
            .or_default()
            .insert(step.to_owned(), true);

        if let (Some(base), Some(next)) = (base, next_tier) {
            self.current_tiers
                .section_entry(job, cat)
                .insert(base, next.to_owned());
        }

        if let Some(items) = self.progression.section_mut(job, cat) {
            if let Some(steps) = items.get_mut(step) {
                steps.remove(step);
                if steps.is_empty() {
                    items.remove(step);
                }
            }
        }
    }

    /// Finalize a step only if every requirement is satisfied.
    pub fn try_complete_upgrade(
        &mut self,
        job: &str,
        category: ArmorCategory,
        item: &str,
        step: &str,
        next_tier: Option<&str>,
        requirements: &[Requirement],
    ) -> CompletionOutcome {
        if self.is_upgrade_complete(job, category, step, step) {
            return CompletionOutcome::AlreadyComplete;
        }
        let satisfied = {
            let progress = self.step_progress(job, category, step, step);
            requirements.iter().all(|req| {
                progress
                    .and_then(|p| p.get(req.key()))
                    .copied()
                    .unwrap_or_default()
                    .satisfies(req)
            })
        };
        if !satisfied || requirements.is_empty() {
            return CompletionOutcome::Incomplete {
                percent: self.calculate_progress(job, category, step, step, requirements),
            };
        }
        self.complete_upgrade(job, category, item, step, next_tier);
        CompletionOutcome::Completed
    }

    /// Forget everything recorded for an item. Returns whether anything was removed.
    pub fn reset_progress(&mut self, job: &str, category: ArmorCategory, item: &str) -> bool {
        let cat = category.as_str();
        let progress = self
            .progression
            .section_mut(job, cat)
            .and_then(|items| items.remove(item))
            .is_some();
        let completed = self
            .completed_upgrades
            .section_mut(job, cat)
            .and_then(|items| items.remove(item))
            .is_some();
        let tier = self
            .current_tiers
            .section_mut(job, cat)
            .and_then(|pointers| pointers.remove(item))
            .is_some();
        progress || completed || tier
    }

    /// Reset a base item together with every step of its upgrade chain.
    pub fn reset_item<'a, I>(
        &mut self,
        job: &str,
        category: ArmorCategory,
        base_item: &str,
        steps: I,
    ) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut removed = self.reset_progress(job, category, base_item);
        for step in steps {
            removed |= self.reset_progress(job, category, step);
        }
        removed
    }

    /// Move completion flags recorded as `item -> step` to `step -> step`.
    ///
    /// Older saves marked a step complete under the base item while reading
    /// it back under the step name. Returns how many flags moved.
    pub fn key_completions_by_step(&mut self) -> usize {
        let mut moved = 0;
        for items in self.completed_upgrades.sections_mut() {
            let stray: Vec<(String, String, bool)> = items
                .iter()
                .flat_map(|(item, steps)| {
                    steps
                        .iter()
                        .filter(move |(step, _)| *step != item)
                        .map(move |(step, done)| (item.clone(), step.clone(), *done))
                })
                .collect();
            for (item, step, done) in stray {
                if let Some(steps) = items.get_mut(&item) {
                    steps.remove(&step);
                    if steps.is_empty() {
                        items.remove(&item);
                    }
                }
                let flag = items
                    .entry(step.clone())
                    .or_default()
                    .entry(step)
                    .or_insert(false);
                *flag |= done;
                moved += 1;
            }
        }
        if moved > 0 {
            log::debug!("re-keyed {moved} completion flags by step name");
        }
        moved
    }
}

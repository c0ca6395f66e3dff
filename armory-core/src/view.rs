//! Derived per-slot view models.
//!
//! A slot card shows whatever tier the character currently holds, plus the
//! upgrade steps still open for it. A step's checklist and completion flag
//! live under the step's own name; the tier pointer lives under the slot's
//! base item name.
use serde::Serialize;

use crate::catalog::{ArmorCategory, ArmorPiece, CatalogLookup, Requirement, Slot, UpgradeStep};
use crate::character::CharacterId;
use crate::progress::StepProgress;
use crate::progression::{ProgressState, progress_percent};
use crate::registry::CharacterRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementView {
    pub name: String,
    pub current: u32,
    pub target: u32,
    pub binary: bool,
    pub satisfied: bool,
}

impl RequirementView {
    fn new(requirement: &Requirement, progress: &StepProgress) -> Self {
        let state = progress.get(requirement.key()).copied().unwrap_or_default();
        Self {
            name: requirement.key().to_owned(),
            current: state.count(),
            target: requirement.target(),
            binary: requirement.is_binary(),
            satisfied: state.satisfies(requirement),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub name: String,
    pub percent: f64,
    pub requirements: Vec<RequirementView>,
    /// Catalog requirements, handed back to the engine on completion.
    #[serde(skip)]
    pub source_requirements: Vec<Requirement>,
    pub url: Option<String>,
    pub icon_url: Option<String>,
}

impl StepView {
    fn new(step: &UpgradeStep, progress: &StepProgress) -> Self {
        Self {
            name: step.name.clone(),
            percent: progress_percent(Some(progress), &step.requirements),
            requirements: step
                .requirements
                .iter()
                .map(|req| RequirementView::new(req, progress))
                .collect(),
            source_requirements: step.requirements.clone(),
            url: step.url.clone(),
            icon_url: step.icon_url.clone(),
        }
    }

    /// Every requirement satisfied.
    #[must_use]
    pub fn ready(&self) -> bool {
        !self.requirements.is_empty() && self.requirements.iter().all(|r| r.satisfied)
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percent(&self) -> u32 {
        self.percent.round().clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub slot: Slot,
    /// Key of this slot's tier pointer.
    pub base_name: String,
    /// Every step name from the base record up to the held tier's path.
    /// Resetting the slot clears each of them.
    pub chain_steps: Vec<String>,
    /// Name of the tier currently held.
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub icon_url: Option<String>,
    pub pending: Vec<StepView>,
}

impl SlotView {
    #[must_use]
    pub fn next_step(&self) -> Option<&StepView> {
        self.pending.first()
    }

    #[must_use]
    pub fn max_tier_reached(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Build the card for one slot. `None` when the catalog has no base item there.
///
/// Without a progression state (no active character) the base item is shown
/// with every step open.
#[must_use]
pub fn slot_view<C>(
    catalog: &C,
    state: Option<&ProgressState>,
    job: &str,
    category: ArmorCategory,
    slot: Slot,
) -> Option<SlotView>
where
    C: CatalogLookup + ?Sized,
{
    let base = catalog.base_piece(job, category, slot)?;
    let held = state.and_then(|s| s.current_tier(job, category, &base.name));
    let shown = match held {
        Some(name) => resolve_held(catalog, base, job, category, slot, name),
        None => Shown::piece(base),
    };

    let pending = shown
        .path
        .iter()
        .filter(|step| {
            !state.is_some_and(|s| s.is_upgrade_complete(job, category, &step.name, &step.name))
        })
        .map(|step| {
            let progress = state
                .map(|s| s.get_step_progress(job, category, &step.name, &step.name))
                .unwrap_or_default();
            StepView::new(step, &progress)
        })
        .collect();

    let mut chain_steps: Vec<String> = Vec::new();
    for step in base.upgrade_path.iter().chain(shown.path) {
        if !chain_steps.contains(&step.name) {
            chain_steps.push(step.name.clone());
        }
    }

    Some(SlotView {
        slot,
        base_name: base.name.clone(),
        chain_steps,
        name: shown.name.to_owned(),
        description: shown.description.cloned(),
        url: shown.url.cloned(),
        icon_url: shown.icon_url.cloned(),
        pending,
    })
}

/// Cards for every slot that has data, in slot order.
#[must_use]
pub fn job_views<C>(
    catalog: &C,
    state: Option<&ProgressState>,
    job: &str,
    category: ArmorCategory,
) -> Vec<SlotView>
where
    C: CatalogLookup + ?Sized,
{
    Slot::ALL
        .iter()
        .filter_map(|slot| slot_view(catalog, state, job, category, *slot))
        .collect()
}

struct Shown<'a> {
    name: &'a str,
    description: Option<&'a String>,
    url: Option<&'a String>,
    icon_url: Option<&'a String>,
    path: &'a [UpgradeStep],
}

impl<'a> Shown<'a> {
    fn piece(piece: &'a ArmorPiece) -> Self {
        Self {
            name: &piece.name,
            description: piece.description.as_ref(),
            url: piece.url.as_ref(),
            icon_url: piece.icon_url.as_ref(),
            path: &piece.upgrade_path,
        }
    }
}

/// A held tier is either its own catalog record or a step inside one.
fn resolve_held<'a, C>(
    catalog: &'a C,
    base: &'a ArmorPiece,
    job: &str,
    category: ArmorCategory,
    slot: Slot,
    held: &'a str,
) -> Shown<'a>
where
    C: CatalogLookup + ?Sized,
{
    if let Some(record) = catalog.find_piece(job, category, slot, held) {
        return Shown::piece(record);
    }
    if let Some((owner, step)) = catalog.find_step_owner(job, category, slot, held) {
        return Shown {
            name: &step.name,
            description: owner.description.as_ref(),
            url: step.url.as_ref(),
            icon_url: step.icon_url.as_ref(),
            path: &owner.upgrade_path,
        };
    }
    log::warn!("held tier '{held}' is not in the {category} catalog for {job}");
    Shown {
        name: held,
        ..Shown::piece(base)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub selected: bool,
}

/// Rows for the character picker, in registry order.
#[must_use]
pub fn character_list(registry: &CharacterRegistry) -> Vec<CharacterSummary> {
    let selected = registry.selected_id();
    registry
        .characters()
        .iter()
        .map(|c| CharacterSummary {
            id: c.id.clone(),
            name: c.name.clone(),
            selected: selected == Some(&c.id),
        })
        .collect()
}

use anyhow::{Context, Result, ensure};
use armory_core::{
    ArmorCategory, CatalogLookup, LEGACY_CHARACTER_NAME, MemoryStore, Slot, StorageKeys, Tracker,
    TrackerConfig, slot_view,
};
use serde_json::json;

use super::{IterationCtx, IterationSummary};

/// Seed a pre-character save built from real catalog names, laid out the way
/// the browser build wrote it, and check that it lands in exactly one
/// "Default" character whose card shows the saved progress.
pub fn run(ctx: &IterationCtx<'_>) -> Result<IterationSummary> {
    let catalog = ctx.assets.catalog();
    let jobs = catalog.jobs();
    ensure!(!jobs.is_empty(), "catalog lists no jobs");
    let pick = usize::try_from(ctx.seed).unwrap_or(usize::MAX);
    let job = jobs[pick % jobs.len()];
    let category = ArmorCategory::Artifact;
    let slot = Slot::ALL[pick % Slot::ALL.len()];

    let base = catalog
        .base_piece(job, category, slot)
        .with_context(|| format!("no {category} {slot:?} for {job}"))?;
    let first = base.upgrade_path.first().context("base item has no steps")?;
    let second = base.upgrade_path.get(1).context("base item has one step")?;
    let requirement = second
        .requirements
        .first()
        .context("second step has no requirements")?;

    let keys = StorageKeys::default();
    let cat = category.as_str();
    let store = MemoryStore::with_entries([
        (
            keys.legacy_progression.clone(),
            json!({ job: { cat: { &second.name: { &second.name: { requirement.key(): 1 } } } } })
                .to_string(),
        ),
        (
            keys.legacy_completed_upgrades.clone(),
            json!({ job: { cat: { &base.name: { &first.name: true } } } }).to_string(),
        ),
        (
            keys.legacy_current_tiers.clone(),
            json!({ job: { cat: { &base.name: &first.name } } }).to_string(),
        ),
    ]);

    let config = TrackerConfig::default_config().with_id_seed(ctx.seed);
    let tracker = Tracker::load(store.clone(), config.clone());
    ensure!(
        tracker.characters().len() == 1,
        "expected one migrated character, found {}",
        tracker.characters().len()
    );
    let character = tracker
        .selected_character()
        .context("migrated character is not selected")?;
    ensure!(
        character.name == LEGACY_CHARACTER_NAME,
        "migrated character is named '{}'",
        character.name
    );
    ensure!(
        tracker.is_upgrade_complete(job, category, &first.name, &first.name),
        "completion flag lost in migration"
    );
    ensure!(
        tracker.current_tier(job, category, &base.name) == Some(first.name.as_str()),
        "tier pointer lost in migration"
    );
    ensure!(
        tracker
            .get_step_progress(job, category, &second.name, &second.name)
            .get(requirement.key())
            .is_some_and(|state| state.count() == 1),
        "requirement progress lost in migration"
    );

    let card = slot_view(catalog, tracker.progress(), job, category, slot)
        .context("migrated slot has no card")?;
    let next = card.next_step().context("migrated card has no open step")?;
    ensure!(
        next.name == second.name,
        "migrated card offers '{}' instead of '{}'",
        next.name,
        second.name
    );
    ensure!(
        next.requirements
            .iter()
            .any(|row| row.name == requirement.key() && row.current == 1),
        "migrated card does not show the saved count for '{}'",
        requirement.key()
    );

    for key in [
        &keys.legacy_progression,
        &keys.legacy_completed_upgrades,
        &keys.legacy_current_tiers,
    ] {
        ensure!(
            store.raw(key).as_deref() == Some("{}"),
            "legacy key '{key}' was not cleared"
        );
    }

    let again = Tracker::load(store, config);
    ensure!(
        again.characters() == tracker.characters(),
        "a second load changed the migrated characters"
    );

    Ok(IterationSummary {
        actions_applied: 1,
        characters: again.characters().len(),
    })
}

use anyhow::{Context, Result, ensure};
use armory_core::{ArmorCategory, CharacterId, MemoryStore, Tracker, character_list};

use super::{IterationCtx, IterationSummary, fresh_tracker, reload};

const JOB: &str = "Monk";
const CATEGORY: ArmorCategory = ArmorCategory::Relic;

/// Add, rename, select and remove characters, checking that each keeps its
/// own progression and that the selection survives reloads.
pub fn run(ctx: &IterationCtx<'_>) -> Result<IterationSummary> {
    let mut tracker = fresh_tracker(ctx.seed);
    let alpha = tracker.add_character("Alpha")?;
    let beta = tracker.add_character("Beta")?;
    let gamma = tracker.add_character("Gamma")?;
    ensure!(
        alpha != beta && beta != gamma && alpha != gamma,
        "character ids collided"
    );
    ensure!(
        tracker.selected_character_id() == Some(&gamma),
        "the newest character should be selected"
    );

    tracker.select_character(beta.clone())?;
    tracker.increment_requirement_count(JOB, CATEGORY, "Hat +1", "Hat +1", "Seal")?;
    tracker.select_character(alpha.clone())?;
    ensure!(
        tracker
            .get_step_progress(JOB, CATEGORY, "Hat +1", "Hat +1")
            .is_empty(),
        "progress leaked from Beta to Alpha"
    );

    tracker.rename_character(&beta, "Beta Prime")?;
    let rows = character_list(tracker.registry());
    let renamed = rows
        .iter()
        .find(|row| row.id == beta)
        .context("renamed character missing from list")?;
    ensure!(renamed.name == "Beta Prime", "rename not applied");
    ensure!(
        rows.iter().filter(|row| row.selected).count() == 1,
        "exactly one row should be selected"
    );

    tracker.remove_character(&alpha)?;
    ensure!(
        tracker.selected_character_id() == Some(&beta),
        "removing the selection should fall back to the first remaining character"
    );
    ensure!(
        seal_count(&tracker) == Some(1),
        "Beta lost its progress"
    );
    tracker.remove_character(&CharacterId::new("missing"))?;
    ensure!(tracker.characters().len() == 2, "removing an unknown id changed the list");

    let reloaded = reload(&tracker, ctx.seed);
    ensure!(
        reloaded.characters() == tracker.characters(),
        "reloaded characters differ from memory"
    );
    ensure!(
        reloaded.selected_character_id() == Some(&beta),
        "selection lost on reload"
    );

    tracker.select_character(CharacterId::new("dangling"))?;
    ensure!(
        tracker.progress().is_none(),
        "a dangling selection should behave like no character"
    );
    tracker.toggle_requirement(JOB, CATEGORY, "Hat +1", "Hat +1", "Seal")?;
    tracker.select_character(beta)?;
    ensure!(
        seal_count(&tracker) == Some(1),
        "a mutation without an active character touched stored progress"
    );

    Ok(IterationSummary {
        actions_applied: 12,
        characters: tracker.characters().len(),
    })
}

fn seal_count(tracker: &Tracker<MemoryStore>) -> Option<u32> {
    tracker
        .get_step_progress(JOB, CATEGORY, "Hat +1", "Hat +1")
        .get("Seal")
        .map(|state| state.count())
}

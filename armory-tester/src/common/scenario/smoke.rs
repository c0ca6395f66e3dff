use anyhow::{Context, Result, ensure};
use armory_core::{ArmorCategory, StepTarget, job_views};

use super::{IterationCtx, IterationSummary, fresh_tracker, reload, satisfy};

/// Load the catalog, add a character, record one requirement and read it
/// back after a reload.
pub fn run(ctx: &IterationCtx<'_>) -> Result<IterationSummary> {
    let catalog = ctx.assets.catalog();
    let job = *catalog.jobs().first().context("catalog lists no jobs")?;
    let category = ArmorCategory::Artifact;

    let fresh = job_views(catalog, None, job, category);
    ensure!(!fresh.is_empty(), "no {category} cards for {job}");
    ensure!(
        fresh.iter().all(|view| view.name == view.base_name),
        "a fresh card should show its base item"
    );

    let mut tracker = fresh_tracker(ctx.seed);
    ensure!(tracker.progress().is_none(), "new tracker has a character");
    let id = tracker.add_character("Smoke Tester")?;

    let view = &fresh[0];
    let step = view.next_step().context("base item has no upgrade steps")?;
    let requirement = step
        .requirements
        .first()
        .context("upgrade step has no requirements")?;
    let target = StepTarget::step(job, category, step.name.as_str());
    tracker.apply(satisfy(&target, requirement))?;

    let percent = tracker.calculate_progress(
        job,
        category,
        &step.name,
        &step.name,
        &step.source_requirements,
    );
    ensure!(percent > 0.0, "progress did not move after satisfying a requirement");

    let reloaded = reload(&tracker, ctx.seed);
    ensure!(
        reloaded.selected_character_id() == Some(&id),
        "selection lost on reload"
    );
    ensure!(
        reloaded.characters() == tracker.characters(),
        "reloaded characters differ from memory"
    );

    Ok(IterationSummary {
        actions_applied: 2,
        characters: reloaded.characters().len(),
    })
}

use anyhow::{Context, Result, ensure};
use armory_core::{ArmorCategory, Slot, slot_view};

use super::{IterationCtx, IterationSummary, finish_step, fresh_tracker};

/// Pick a job and category by seed, then drive every slot from its base
/// item to the last tier and reset the whole chain again.
pub fn completion_chain(ctx: &IterationCtx<'_>) -> Result<IterationSummary> {
    let catalog = ctx.assets.catalog();
    let jobs = catalog.jobs();
    ensure!(!jobs.is_empty(), "catalog lists no jobs");
    let pick = usize::try_from(ctx.seed).unwrap_or(usize::MAX);
    let job = jobs[pick % jobs.len()];
    let category = ArmorCategory::ALL[(pick / jobs.len()) % ArmorCategory::ALL.len()];

    let mut tracker = fresh_tracker(ctx.seed);
    tracker.add_character("Chain Runner")?;
    let mut applied = 0;

    for slot in Slot::ALL {
        let Some(mut view) = slot_view(catalog, tracker.progress(), job, category, slot) else {
            continue;
        };
        let base = view.base_name.clone();
        let path_len = view.pending.len();

        for _ in 0..path_len {
            let Some(step) = view.next_step().cloned() else {
                break;
            };
            applied += finish_step(&mut tracker, job, category, &base, &step)?;
            ensure!(
                tracker.is_upgrade_complete(job, category, &step.name, &step.name),
                "'{}' not marked complete",
                step.name
            );
            ensure!(
                tracker
                    .get_step_progress(job, category, &step.name, &step.name)
                    .is_empty(),
                "'{}' kept its checklist after completion",
                step.name
            );

            let pending_before = view.pending.len();
            view = slot_view(catalog, tracker.progress(), job, category, slot)
                .context("slot card disappeared")?;
            ensure!(
                view.name == step.name,
                "{slot:?} card shows '{}' after completing '{}'",
                view.name,
                step.name
            );
            ensure!(
                view.pending.len() < pending_before,
                "completing '{}' left the pending list unchanged",
                step.name
            );
        }
        ensure!(
            view.max_tier_reached(),
            "{slot:?} still has steps after {path_len} completions"
        );

        tracker.reset_item(job, category, &base, &view.chain_steps)?;
        applied += 1;
        let view = slot_view(catalog, tracker.progress(), job, category, slot)
            .context("slot card disappeared after reset")?;
        ensure!(view.name == base, "reset did not return {slot:?} to '{base}'");
        ensure!(
            view.pending.len() == path_len,
            "reset left completed steps behind"
        );
        ensure!(
            tracker.current_tier(job, category, &base).is_none(),
            "reset kept the tier pointer"
        );
    }

    Ok(IterationSummary {
        actions_applied: applied,
        characters: tracker.characters().len(),
    })
}

/// Completing a step addressed by the held tier's name moves the pointer of
/// the base item that holds it.
pub fn reverse_base(ctx: &IterationCtx<'_>) -> Result<IterationSummary> {
    let job = "Warrior";
    let category = ArmorCategory::Artifact;
    let mut tracker = fresh_tracker(ctx.seed);
    tracker.add_character("Resolver")?;

    tracker.complete_upgrade(job, category, "Item A", "Item B", Some("Item B"))?;
    ensure!(
        tracker.current_tier(job, category, "Item A") == Some("Item B"),
        "first completion did not move the pointer"
    );
    ensure!(
        tracker.resolve_base_item(job, category, "Item B") == "Item A",
        "held tier does not resolve to its base"
    );

    tracker.complete_upgrade(job, category, "Item B", "Item C", Some("Item C"))?;
    ensure!(
        tracker.current_tier(job, category, "Item A") == Some("Item C"),
        "pointer for 'Item A' is {:?}",
        tracker.current_tier(job, category, "Item A")
    );
    ensure!(
        tracker.current_tier(job, category, "Item B").is_none(),
        "a pointer was created for the held tier itself"
    );
    ensure!(
        tracker.resolve_base_item(job, category, "Item D") == "Item D",
        "an unpointed item should resolve to itself"
    );

    Ok(IterationSummary {
        actions_applied: 2,
        characters: 1,
    })
}

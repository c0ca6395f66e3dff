use anyhow::{Context, Result, ensure};
use armory_core::{
    Action, ArmorCategory, Catalog, CatalogLookup, MemoryStore, Slot, SlotView, StepTarget,
    Tracker, job_views,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::{IterationCtx, IterationSummary, fresh_tracker, reload, satisfy};

const ACTIONS_PER_ITERATION: usize = 60;

/// Apply a seeded stream of user actions and check the tracker's invariants
/// after every one of them.
pub fn run(ctx: &IterationCtx<'_>) -> Result<IterationSummary> {
    let catalog = ctx.assets.catalog();
    let jobs = catalog.jobs();
    ensure!(!jobs.is_empty(), "catalog lists no jobs");

    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let mut tracker = fresh_tracker(ctx.seed);
    tracker.add_character("Fuzzer")?;

    for step in 0..ACTIONS_PER_ITERATION {
        let job = *jobs.choose(&mut rng).context("catalog lists no jobs")?;
        let category = *ArmorCategory::ALL
            .choose(&mut rng)
            .context("no categories")?;
        let views = job_views(catalog, tracker.progress(), job, category);
        let Some(view) = views.choose(&mut rng) else {
            continue;
        };

        let action = random_action(&mut rng, job, category, view);
        let expected = expected_count(&tracker, &action);
        tracker
            .apply(action.clone())
            .with_context(|| format!("action {step}: {action:?}"))?;

        if let Some((requirement, count)) = expected {
            let target = action_target(&action).context("counted action without a target")?;
            let actual = tracker
                .get_step_progress(&target.job, target.category, &target.item, &target.step)
                .get(&requirement)
                .map_or(0, |state| state.count());
            ensure!(
                actual == count,
                "action {step}: '{requirement}' is {actual}, expected {count}"
            );
        }
        check_invariants(catalog, &tracker, job, category)
            .with_context(|| format!("after action {step}: {action:?}"))?;
    }

    let reloaded = reload(&tracker, ctx.seed);
    ensure!(
        reloaded.characters() == tracker.characters(),
        "reloaded state differs from memory"
    );

    Ok(IterationSummary {
        actions_applied: ACTIONS_PER_ITERATION,
        characters: tracker.characters().len(),
    })
}

fn random_action<R: Rng>(
    rng: &mut R,
    job: &str,
    category: ArmorCategory,
    view: &SlotView,
) -> Action {
    let reset = || Action::ResetProgress {
        job: job.to_string(),
        category,
        item: view.base_name.clone(),
        steps: view.chain_steps.clone(),
    };
    let Some(step) = view.next_step() else {
        return reset();
    };
    let target = StepTarget::step(job, category, step.name.as_str());
    let Some(requirement) = step.requirements.choose(rng) else {
        return reset();
    };
    let name = requirement.name.clone();

    match rng.gen_range(0..10) {
        0 | 1 => Action::ToggleRequirement {
            target,
            requirement: name,
        },
        2 => Action::SetRequirementCount {
            target,
            requirement: name,
            count: rng.gen_range(0..=requirement.target.saturating_add(1)),
        },
        3 | 4 => Action::IncrementRequirement {
            target,
            requirement: name,
        },
        5 => Action::DecrementRequirement {
            target,
            requirement: name,
        },
        6 => satisfy(&target, requirement),
        7 | 8 => Action::CompleteUpgrade {
            target: StepTarget::new(job, category, view.base_name.as_str(), step.name.as_str()),
            next_tier: Some(step.name.clone()),
            requirements: step.source_requirements.clone(),
        },
        _ => reset(),
    }
}

fn action_target(action: &Action) -> Option<&StepTarget> {
    match action {
        Action::ToggleRequirement { target, .. }
        | Action::SetRequirementCount { target, .. }
        | Action::IncrementRequirement { target, .. }
        | Action::DecrementRequirement { target, .. }
        | Action::CompleteUpgrade { target, .. } => Some(target),
        _ => None,
    }
}

/// Requirement count an action must leave behind, computed from the state
/// before it runs.
fn expected_count(tracker: &Tracker<MemoryStore>, action: &Action) -> Option<(String, u32)> {
    let current = |target: &StepTarget, requirement: &str| {
        tracker
            .get_step_progress(&target.job, target.category, &target.item, &target.step)
            .get(requirement)
            .map_or(0, |state| state.count())
    };
    match action {
        Action::ToggleRequirement {
            target,
            requirement,
        } => Some((
            requirement.clone(),
            u32::from(current(target, requirement) == 0),
        )),
        Action::SetRequirementCount {
            requirement, count, ..
        } => Some((requirement.clone(), *count)),
        Action::IncrementRequirement {
            target,
            requirement,
        } => Some((
            requirement.clone(),
            current(target, requirement).saturating_add(1),
        )),
        Action::DecrementRequirement {
            target,
            requirement,
        } => Some((
            requirement.clone(),
            current(target, requirement).saturating_sub(1),
        )),
        _ => None,
    }
}

/// Consistency rules that must hold for every slot of the touched job/category.
fn check_invariants(
    catalog: &Catalog,
    tracker: &Tracker<MemoryStore>,
    job: &str,
    category: ArmorCategory,
) -> Result<()> {
    for view in job_views(catalog, tracker.progress(), job, category) {
        let base = catalog
            .base_piece(job, category, view.slot)
            .context("card without a base item")?;

        for step in &view.pending {
            ensure!(
                (0.0..=100.0).contains(&step.percent),
                "'{}' reports {}%",
                step.name,
                step.percent
            );
            let fully = step.requirements.iter().all(|r| r.satisfied);
            ensure!(
                !fully || (step.percent - 100.0).abs() < 1e-9,
                "'{}' is fully satisfied but reports {}%",
                step.name,
                step.percent
            );
        }

        for step in &base.upgrade_path {
            if tracker.is_upgrade_complete(job, category, &step.name, &step.name) {
                ensure!(
                    tracker
                        .get_step_progress(job, category, &step.name, &step.name)
                        .is_empty(),
                    "completed step '{}' still has a checklist",
                    step.name
                );
            }
        }

        if let Some(held) = tracker.current_tier(job, category, &base.name) {
            ensure!(
                pointer_is_known(catalog, job, category, view.slot, held),
                "'{}' points at unknown tier '{held}'",
                base.name
            );
            ensure!(view.name == held, "card shows '{}' but holds '{held}'", view.name);
        }
    }
    Ok(())
}

fn pointer_is_known(
    catalog: &Catalog,
    job: &str,
    category: ArmorCategory,
    slot: Slot,
    held: &str,
) -> bool {
    catalog.find_piece(job, category, slot, held).is_some()
        || catalog.find_step_owner(job, category, slot, held).is_some()
}

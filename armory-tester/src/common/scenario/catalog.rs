use anyhow::{Result, bail, ensure};
use armory_core::{ArmorCategory, Slot, is_known_job};
use std::collections::BTreeSet;

use super::{IterationCtx, IterationSummary};

/// Fail on any load diagnostic and on data the tracker would silently mishandle.
pub fn run(ctx: &IterationCtx<'_>) -> Result<IterationSummary> {
    let assets = ctx.assets;
    if let Some(diagnostic) = assets.diagnostics().first() {
        bail!(
            "{} catalog diagnostics in {}, first: {diagnostic}",
            assets.diagnostics().len(),
            assets.source().display()
        );
    }
    ensure!(
        assets.failed_categories().is_empty(),
        "categories failed to load: {:?}",
        assets.failed_categories()
    );

    let catalog = assets.catalog();
    for job in catalog.jobs() {
        ensure!(is_known_job(job), "unknown job '{job}'");
        for category in ArmorCategory::ALL {
            check_category(ctx, job, category)?;
        }
    }

    Ok(IterationSummary {
        actions_applied: catalog.len(),
        characters: 0,
    })
}

fn check_category(ctx: &IterationCtx<'_>, job: &str, category: ArmorCategory) -> Result<()> {
    let pieces = ctx.assets.catalog().pieces(job, category);
    for slot in Slot::ALL {
        let bases = pieces
            .iter()
            .filter(|piece| piece.slot == slot && piece.is_base())
            .count();
        ensure!(
            bases <= 1,
            "{job} {category} {slot:?} has {bases} base items; only the first is reachable"
        );
    }

    for piece in pieces {
        let mut seen = BTreeSet::new();
        for step in &piece.upgrade_path {
            ensure!(!step.name.is_empty(), "'{}' has an unnamed step", piece.name);
            ensure!(
                step.name != piece.name,
                "'{}' upgrades into itself",
                piece.name
            );
            ensure!(
                seen.insert(step.name.as_str()),
                "'{}' lists step '{}' twice",
                piece.name,
                step.name
            );
            ensure!(
                !step.requirements.is_empty(),
                "step '{}' of '{}' has no requirements and can never complete",
                step.name,
                piece.name
            );
        }
    }
    Ok(())
}

use anyhow::{Context, Result};
use armory_core::{
    Action, ArmorCategory, MemoryStore, RequirementView, StepTarget, StepView, Tracker,
    TrackerConfig,
};

use crate::logic::TesterAssets;

pub mod catalog;
pub mod characters;
pub mod migration;
pub mod progression;
pub mod random_actions;
pub mod smoke;

/// Inputs for one iteration of a scenario.
#[derive(Debug, Clone, Copy)]
pub struct IterationCtx<'a> {
    pub seed: u64,
    pub assets: &'a TesterAssets,
}

/// What a passing iteration did, for verbose output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationSummary {
    pub actions_applied: usize,
    pub characters: usize,
}

pub type ScenarioFn = fn(&IterationCtx<'_>) -> Result<IterationSummary>;

#[derive(Clone, Copy)]
pub struct TestScenario {
    pub name: &'static str,
    pub run: ScenarioFn,
}

struct Entry {
    key: &'static str,
    aliases: &'static [&'static str],
    scenario: TestScenario,
}

const SCENARIOS: &[Entry] = &[
    Entry {
        key: "smoke",
        aliases: &[],
        scenario: TestScenario {
            name: "Smoke Test",
            run: smoke::run,
        },
    },
    Entry {
        key: "catalog-validate",
        aliases: &["catalog"],
        scenario: TestScenario {
            name: "Catalog Validation",
            run: catalog::run,
        },
    },
    Entry {
        key: "completion-chain",
        aliases: &["chain"],
        scenario: TestScenario {
            name: "Full Upgrade Chain",
            run: progression::completion_chain,
        },
    },
    Entry {
        key: "reverse-base",
        aliases: &[],
        scenario: TestScenario {
            name: "Reverse Base Resolution",
            run: progression::reverse_base,
        },
    },
    Entry {
        key: "character-lifecycle",
        aliases: &["characters"],
        scenario: TestScenario {
            name: "Character Lifecycle",
            run: characters::run,
        },
    },
    Entry {
        key: "migration",
        aliases: &["legacy-migration"],
        scenario: TestScenario {
            name: "Legacy Migration",
            run: migration::run,
        },
    },
    Entry {
        key: "random-actions",
        aliases: &["random", "fuzz"],
        scenario: TestScenario {
            name: "Randomized Action Sequences",
            run: random_actions::run,
        },
    },
];

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let name = name.to_lowercase();
    SCENARIOS
        .iter()
        .find(|entry| entry.key == name || entry.aliases.contains(&name.as_str()))
        .map(|entry| entry.scenario)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|entry| (entry.key, entry.scenario.name))
        .collect()
}

/// Keys run by `--scenarios all`, in registry order.
pub fn all_scenario_keys() -> Vec<String> {
    SCENARIOS.iter().map(|entry| entry.key.to_string()).collect()
}

fn fresh_tracker(seed: u64) -> Tracker<MemoryStore> {
    Tracker::load(
        MemoryStore::new(),
        TrackerConfig::default_config().with_id_seed(seed),
    )
}

fn reload(tracker: &Tracker<MemoryStore>, seed: u64) -> Tracker<MemoryStore> {
    Tracker::load(
        tracker.store().clone(),
        TrackerConfig::default_config().with_id_seed(seed),
    )
}

/// Action that satisfies one requirement of a step outright.
fn satisfy(target: &StepTarget, requirement: &RequirementView) -> Action {
    if requirement.binary {
        Action::ToggleRequirement {
            target: target.clone(),
            requirement: requirement.name.clone(),
        }
    } else {
        Action::SetRequirementCount {
            target: target.clone(),
            requirement: requirement.name.clone(),
            count: requirement.target,
        }
    }
}

/// Satisfy every open requirement of `step` and complete it for `base`.
/// Returns the number of actions applied.
fn finish_step(
    tracker: &mut Tracker<MemoryStore>,
    job: &str,
    category: ArmorCategory,
    base: &str,
    step: &StepView,
) -> Result<usize> {
    let checklist = StepTarget::step(job, category, step.name.as_str());
    let mut applied = 0;
    for requirement in step.requirements.iter().filter(|r| !r.satisfied) {
        tracker
            .apply(satisfy(&checklist, requirement))
            .with_context(|| format!("satisfying '{}'", requirement.name))?;
        applied += 1;
    }
    tracker
        .apply(Action::CompleteUpgrade {
            target: StepTarget::new(job, category, base, step.name.as_str()),
            next_tier: Some(step.name.clone()),
            requirements: step.source_requirements.clone(),
        })
        .with_context(|| format!("completing '{}'", step.name))?;
    Ok(applied + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_keys_and_aliases() {
        assert_eq!(get_scenario("smoke").unwrap().name, "Smoke Test");
        assert_eq!(get_scenario("FUZZ").unwrap().name, "Randomized Action Sequences");
        assert_eq!(get_scenario("catalog").unwrap().name, "Catalog Validation");
        assert!(get_scenario("no-such-scenario").is_none());
    }

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, description) in list_scenarios() {
            assert_eq!(get_scenario(key).unwrap().name, description);
        }
        assert_eq!(all_scenario_keys().len(), list_scenarios().len());
    }
}

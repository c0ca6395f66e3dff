use armory_core::{Action, ArmorCategory, RequirementView, Slot, SlotView, StepTarget, StepView};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: SlotView,
    pub job: AttrValue,
    pub category: ArmorCategory,
    pub on_action: Callback<Action>,
}

const fn slot_color(slot: Slot) -> &'static str {
    match slot {
        Slot::Head => "slot-head",
        Slot::Body => "slot-body",
        Slot::Hands => "slot-hands",
        Slot::Legs => "slot-legs",
        Slot::Feet => "slot-feet",
    }
}

fn fallback_image(slot: Slot, name: &str) -> Html {
    html! {
        <div class={classes!("armor-fallback", slot_color(slot))} title={name.to_owned()}>
            <span>{ slot.as_str() }</span>
        </div>
    }
}

fn progress_bar(percent: u32) -> Html {
    html! {
        <div class="progress-track" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow={percent.to_string()}>
            <div class="progress-fill" style={format!("width: {percent}%")}></div>
        </div>
    }
}

fn requirement_row(
    req: &RequirementView,
    target: &StepTarget,
    on_action: &Callback<Action>,
) -> Html {
    let on_check = {
        let cb = on_action.clone();
        let target = target.clone();
        let name = req.name.clone();
        let binary = req.binary;
        let satisfied = req.satisfied;
        let goal = req.target;
        Callback::from(move |_: Event| {
            let action = if binary {
                Action::ToggleRequirement {
                    target: target.clone(),
                    requirement: name.clone(),
                }
            } else {
                Action::SetRequirementCount {
                    target: target.clone(),
                    requirement: name.clone(),
                    count: if satisfied { 0 } else { goal },
                }
            };
            cb.emit(action);
        })
    };

    let counters = (!req.binary).then(|| {
        let on_dec = {
            let cb = on_action.clone();
            let target = target.clone();
            let name = req.name.clone();
            Callback::from(move |_| {
                cb.emit(Action::DecrementRequirement {
                    target: target.clone(),
                    requirement: name.clone(),
                });
            })
        };
        let on_inc = {
            let cb = on_action.clone();
            let target = target.clone();
            let name = req.name.clone();
            Callback::from(move |_| {
                cb.emit(Action::IncrementRequirement {
                    target: target.clone(),
                    requirement: name.clone(),
                });
            })
        };
        html! {
            <>
                <button class="count-btn dec" onclick={on_dec} disabled={req.current == 0}
                    aria-label={format!("Decrease {}", req.name)}>{ "−" }</button>
                <button class="count-btn inc" onclick={on_inc} disabled={req.current >= req.target}
                    aria-label={format!("Increase {}", req.name)}>{ "+" }</button>
            </>
        }
    });

    let label = if req.binary {
        req.name.clone()
    } else {
        format!("{}: {} / {}", req.name, req.current, req.target)
    };

    html! {
        <div class={classes!("requirement", req.satisfied.then_some("done"))}>
            <input
                type="checkbox"
                checked={req.satisfied}
                onchange={on_check}
                aria-label={format!("Mark {} as complete", req.name)}
            />
            <span class="requirement-label">
                { label }
                if req.satisfied {
                    <span class="check" title="Complete">{ "✓" }</span>
                }
            </span>
            { counters.unwrap_or_default() }
        </div>
    }
}

fn step_card(
    step: &StepView,
    target: StepTarget,
    base_item: &str,
    on_action: &Callback<Action>,
) -> Html {
    let percent = step.rounded_percent();
    let complete = step.ready().then(|| {
        let cb = on_action.clone();
        let target = StepTarget {
            item: base_item.to_owned(),
            ..target.clone()
        };
        let requirements = step.source_requirements.clone();
        let onclick = Callback::from(move |_| {
            cb.emit(Action::CompleteUpgrade {
                next_tier: Some(target.step.clone()),
                target: target.clone(),
                requirements: requirements.clone(),
            });
        });
        html! { <button class="complete-btn" {onclick}>{ "Complete Upgrade" }</button> }
    });

    html! {
        <div class="upgrade-step" key={step.name.clone()}>
            <div class="step-header">
                <h3>
                    if let Some(url) = step.url.clone() {
                        <a href={url} target="_blank" rel="noopener noreferrer">{ step.name.clone() }</a>
                    } else {
                        { step.name.clone() }
                    }
                </h3>
                <div class="step-status">
                    <span class="percent">{ format!("{percent}%") }</span>
                    { complete.unwrap_or_default() }
                </div>
            </div>
            { progress_bar(percent) }
            <div class="requirements">
                { for step.requirements.iter().map(|req| requirement_row(req, &target, on_action)) }
            </div>
        </div>
    }
}

#[function_component(ArmorItem)]
pub fn armor_item(p: &Props) -> Html {
    let image_failed = use_state(|| false);
    let view = &p.view;

    let image = match view.icon_url.clone() {
        Some(src) if !*image_failed => {
            let onerror = {
                let image_failed = image_failed.clone();
                Callback::from(move |_: Event| image_failed.set(true))
            };
            html! {
                <img class="armor-icon" {src} {onerror}
                    alt={format!("{} - {} armor piece", view.name, view.slot)} />
            }
        }
        _ => fallback_image(view.slot, &view.name),
    };

    let on_reset = {
        let cb = p.on_action.clone();
        let job = p.job.to_string();
        let category = p.category;
        let item = view.base_name.clone();
        let steps = view.chain_steps.clone();
        Callback::from(move |_| {
            cb.emit(Action::ResetProgress {
                job: job.clone(),
                category,
                item: item.clone(),
                steps: steps.clone(),
            });
        })
    };

    let steps = view.pending.iter().map(|step| {
        let target = StepTarget::step(p.job.as_str(), p.category, &step.name);
        step_card(step, target, &view.base_name, &p.on_action)
    });

    html! {
        <div class="armor-item">
            <div class="armor-summary">
                <div class="armor-image">{ image }</div>
                <div class="armor-text">
                    <div class="armor-title">
                        <h3>
                            if let Some(url) = view.url.clone() {
                                <a href={url} target="_blank" rel="noopener noreferrer">{ view.name.clone() }</a>
                            } else {
                                { view.name.clone() }
                            }
                        </h3>
                        <button class="reset-btn" title="Reset progress for this item" onclick={on_reset}>
                            { "Reset" }
                        </button>
                    </div>
                    if let Some(description) = view.description.clone() {
                        <p class="description">{ description }</p>
                    }
                </div>
            </div>
            if view.max_tier_reached() {
                <div class="max-tier">{ "Max tier reached" }</div>
            } else {
                <div class="upgrade-steps">{ for steps }</div>
            }
        </div>
    }
}

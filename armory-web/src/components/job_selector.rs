use armory_core::job_code;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub jobs: Vec<AttrValue>,
    pub selected: AttrValue,
    pub on_select: Callback<AttrValue>,
}

#[function_component(JobSelector)]
pub fn job_selector(p: &Props) -> Html {
    html! {
        <div class="job-selector">
            <label class="selector-label">{ "Select Job" }</label>
            <div class="job-grid" role="radiogroup" aria-label="Job">
                { for p.jobs.iter().map(|job| {
                    let active = *job == p.selected;
                    let onclick = {
                        let cb = p.on_select.clone();
                        let job = job.clone();
                        Callback::from(move |_| cb.emit(job.clone()))
                    };
                    let label = job_code(job).map_or_else(|| job.clone(), AttrValue::from);
                    html! {
                        <button
                            class={classes!("job-btn", active.then_some("active"))}
                            title={job.clone()}
                            role="radio"
                            aria-checked={active.to_string()}
                            {onclick}
                        >
                            { label }
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

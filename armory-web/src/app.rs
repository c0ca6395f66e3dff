use armory_core::Catalog;
#[cfg(target_arch = "wasm32")]
use armory_core::{
    Action, ArmorCategory, CatalogLoad, Tracker, TrackerConfig, character_list, job_views,
};
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
use yew::AttrValue;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::components::{
    armor_list::ArmorList, armor_type_selector::ArmorTypeSelector,
    character_selector::CharacterSelector, job_selector::JobSelector,
};
#[cfg(target_arch = "wasm32")]
use crate::{catalog::fetch_catalog, dom, storage::LocalStore};

/// Jobs offered by the picker: those with catalog data, alphabetically.
#[must_use]
pub fn picker_jobs(catalog: &Catalog) -> Vec<AttrValue> {
    catalog
        .jobs()
        .into_iter()
        .map(|job| AttrValue::from(job.to_owned()))
        .collect()
}

#[cfg(target_arch = "wasm32")]
enum CatalogStatus {
    Loading,
    Ready(Rc<CatalogLoad>),
    Failed(String),
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let status = use_state(|| CatalogStatus::Loading);
    let tracker = use_mut_ref(|| {
        Tracker::load(
            LocalStore::open(),
            TrackerConfig::default_config().with_id_seed(dom::random_seed()),
        )
    });
    let save_failed = use_state(|| false);
    let refresh = use_force_update();
    let job = use_state(String::new);
    let category = use_state(|| ArmorCategory::Artifact);

    // Load the catalog once
    {
        let status = status.clone();
        let job = job.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_catalog().await {
                    Ok(load) => {
                        if let Some(warning) = load.warning() {
                            log::warn!("{warning}");
                        }
                        if let Some(first) = load.catalog.jobs().first() {
                            job.set((*first).to_owned());
                        }
                        status.set(CatalogStatus::Ready(Rc::new(load)));
                    }
                    Err(err) => {
                        dom::console_error(&err.to_string());
                        status.set(CatalogStatus::Failed(err.to_string()));
                    }
                }
            });
            || {}
        });
    }

    let on_action = {
        let tracker = tracker.clone();
        let save_failed = save_failed.clone();
        Callback::from(move |action: Action| {
            let result = tracker.borrow_mut().apply(action);
            save_failed.set(result.is_err());
            refresh.force_update();
        })
    };
    let on_job = {
        let job = job.clone();
        Callback::from(move |next: AttrValue| job.set(next.to_string()))
    };
    let on_category = {
        let category = category.clone();
        Callback::from(move |next: ArmorCategory| category.set(next))
    };

    let load = match &*status {
        CatalogStatus::Loading => return html! { <div class="loading">{ "Loading..." }</div> },
        CatalogStatus::Failed(message) => {
            return html! { <div class="load-error">{ format!("Error: {message}") }</div> };
        }
        CatalogStatus::Ready(load) => Rc::clone(load),
    };

    let (characters, views, has_character) = {
        let tracker = tracker.borrow();
        (
            character_list(tracker.registry()),
            job_views(&load.catalog, tracker.progress(), &job, *category),
            tracker.selected_character().is_some(),
        )
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{ "FFXI Armor Upgrade Guide" }</h1>
            </header>
            <main class="container">
                if let Some(warning) = load.warning() {
                    <div class="banner warning" role="status">{ warning }</div>
                }
                if *save_failed {
                    <div class="banner error" role="alert">
                        { "Progress could not be saved in this browser. Changes last until the page is closed." }
                    </div>
                }
                <CharacterSelector characters={characters} on_action={on_action.clone()} />
                <JobSelector
                    jobs={picker_jobs(&load.catalog)}
                    selected={AttrValue::from((*job).clone())}
                    on_select={on_job}
                />
                <ArmorTypeSelector
                    selected={*category}
                    enabled={!job.is_empty()}
                    on_select={on_category}
                />
                <ArmorList
                    views={views}
                    job={AttrValue::from((*job).clone())}
                    category={*category}
                    {has_character}
                    {on_action}
                />
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::picker_jobs;
    use armory_core::{ArmorCategory, CatalogBuilder};

    #[test]
    fn picker_lists_catalog_jobs_sorted() {
        let load = CatalogBuilder::from_documents([(
            ArmorCategory::Relic,
            include_str!("../static/data/Relic.json"),
        )])
        .unwrap();
        let jobs: Vec<String> = picker_jobs(&load.catalog)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(jobs, vec!["Monk", "Warrior"]);
    }
}

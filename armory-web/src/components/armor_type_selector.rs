use armory_core::ArmorCategory;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub selected: ArmorCategory,
    /// Category buttons are hidden until a job is chosen.
    #[prop_or(true)]
    pub enabled: bool,
    pub on_select: Callback<ArmorCategory>,
}

#[function_component(ArmorTypeSelector)]
pub fn armor_type_selector(p: &Props) -> Html {
    if !p.enabled {
        return html! {
            <div class="type-selector disabled">
                <h2>{ "Select Armor Type" }</h2>
                <div class="hint">{ "Please select a job first" }</div>
            </div>
        };
    }
    html! {
        <div class="type-selector">
            <h2>{ "Select Armor Type" }</h2>
            <div class="type-buttons">
                { for ArmorCategory::ALL.into_iter().map(|category| {
                    let onclick = {
                        let cb = p.on_select.clone();
                        Callback::from(move |_| cb.emit(category))
                    };
                    html! {
                        <button
                            class={classes!("type-btn", (category == p.selected).then_some("active"))}
                            {onclick}
                        >
                            { category.as_str() }
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

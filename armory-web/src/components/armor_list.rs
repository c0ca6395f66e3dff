use armory_core::{Action, ArmorCategory, SlotView};
use yew::prelude::*;

use super::armor_item::ArmorItem;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub views: Vec<SlotView>,
    pub job: AttrValue,
    pub category: ArmorCategory,
    pub has_character: bool,
    pub on_action: Callback<Action>,
}

#[function_component(ArmorList)]
pub fn armor_list(p: &Props) -> Html {
    if !p.has_character {
        return html! {
            <div class="armor-list-empty">
                { "No character selected. Please add a character to begin tracking armor progression." }
            </div>
        };
    }
    if p.views.is_empty() {
        return html! {
            <div class="armor-list-error">
                { format!("No {} armor found for {}", p.category, p.job) }
            </div>
        };
    }
    html! {
        <div class="armor-list">
            { for p.views.iter().map(|view| html! {
                <section class="slot-card" key={view.slot.as_str()}>
                    <div class="slot-header"><h2>{ view.slot.as_str() }</h2></div>
                    <ArmorItem
                        view={view.clone()}
                        job={p.job.clone()}
                        category={p.category}
                        on_action={p.on_action.clone()}
                    />
                </section>
            }) }
        </div>
    }
}

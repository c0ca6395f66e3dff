use armory_core::{Action, CharacterId, CharacterSummary};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub characters: Vec<CharacterSummary>,
    pub on_action: Callback<Action>,
}

fn input_value(e: &InputEvent) -> Option<String> {
    e.target_dyn_into::<web_sys::HtmlInputElement>()
        .map(|input| input.value())
}

#[function_component(CharacterSelector)]
pub fn character_selector(p: &Props) -> Html {
    let new_name = use_state(String::new);
    let editing = use_state(|| None::<(CharacterId, String)>);

    let on_new_input = {
        let new_name = new_name.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                new_name.set(value);
            }
        })
    };
    let on_add = {
        let new_name = new_name.clone();
        let cb = p.on_action.clone();
        Callback::from(move |_| {
            let name = new_name.trim();
            if !name.is_empty() {
                cb.emit(Action::AddCharacter {
                    name: name.to_owned(),
                });
                new_name.set(String::new());
            }
        })
    };

    let add_row = html! {
        <div class="character-add">
            <input
                type="text"
                value={(*new_name).clone()}
                oninput={on_new_input}
                placeholder="Add character..."
                aria-label="New character name"
            />
            <button class="add-btn" onclick={on_add}>{ "Add" }</button>
        </div>
    };

    if p.characters.is_empty() {
        return html! {
            <div class="character-selector empty">
                <div class="prompt">
                    { "No characters found. Please add a character to begin tracking armor progression." }
                </div>
                { add_row }
            </div>
        };
    }

    let rows = p.characters.iter().map(|character| {
        let id = character.id.clone();
        let editing_this = (*editing)
            .as_ref()
            .filter(|(editing_id, _)| *editing_id == id)
            .map(|(_, draft)| draft.clone());

        if let Some(draft) = editing_this {
            let on_edit_input = {
                let editing = editing.clone();
                let id = id.clone();
                Callback::from(move |e: InputEvent| {
                    if let Some(value) = input_value(&e) {
                        editing.set(Some((id.clone(), value)));
                    }
                })
            };
            let on_save = {
                let editing = editing.clone();
                let cb = p.on_action.clone();
                let id = id.clone();
                let draft = draft.clone();
                Callback::from(move |_| {
                    let name = draft.trim();
                    if !name.is_empty() {
                        cb.emit(Action::RenameCharacter {
                            id: id.clone(),
                            name: name.to_owned(),
                        });
                        editing.set(None);
                    }
                })
            };
            let on_cancel = {
                let editing = editing.clone();
                Callback::from(move |_| editing.set(None))
            };
            return html! {
                <li key={id.to_string()} class="character-row editing">
                    <input type="text" value={draft} oninput={on_edit_input} aria-label="Character name" />
                    <button class="save-btn" onclick={on_save}>{ "Save" }</button>
                    <button class="cancel-btn" onclick={on_cancel}>{ "Cancel" }</button>
                </li>
            };
        }

        let on_select = {
            let cb = p.on_action.clone();
            let id = id.clone();
            Callback::from(move |_| cb.emit(Action::SelectCharacter { id: id.clone() }))
        };
        let on_rename = {
            let editing = editing.clone();
            let id = id.clone();
            let name = character.name.clone();
            Callback::from(move |_| editing.set(Some((id.clone(), name.clone()))))
        };
        let on_delete = {
            let cb = p.on_action.clone();
            let id = id.clone();
            Callback::from(move |_| cb.emit(Action::RemoveCharacter { id: id.clone() }))
        };
        html! {
            <li key={id.to_string()} class="character-row">
                <button
                    class={classes!("character-btn", character.selected.then_some("active"))}
                    aria-pressed={character.selected.to_string()}
                    onclick={on_select}
                >
                    { character.name.clone() }
                </button>
                <button class="rename-btn" onclick={on_rename}>{ "Rename" }</button>
                <button class="delete-btn" onclick={on_delete}>{ "Delete" }</button>
            </li>
        }
    });

    html! {
        <div class="character-selector">
            { add_row }
            <ul class="character-list">{ for rows }</ul>
        </div>
    }
}

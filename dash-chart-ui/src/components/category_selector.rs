//! Select / multi-select bound to one categorical column.

use crate::state::AppState;
use dioxus::prelude::*;

/// Category control for `column`, as described by the dashboard config.
///
/// Single-choice controls render a dropdown. Multi-choice controls render a
/// checkbox group; ticking the all-token means "every category" regardless
/// of what else is ticked.
#[component]
pub fn CategorySelector(column: String) -> Element {
    let mut state = use_context::<AppState>();
    let Some(control) = state
        .config
        .read()
        .categories
        .iter()
        .find(|c| c.column == column)
        .cloned()
    else {
        log::warn!("[Dash] no category control for column '{}'", column);
        return rsx! {};
    };
    let picked = state
        .category_keys
        .read()
        .get(&column)
        .cloned()
        .unwrap_or_default();
    let select_id = format!("{}-select", column);

    if !control.multiple {
        let on_change = {
            let column = column.clone();
            move |evt: Event<FormData>| {
                state
                    .category_keys
                    .write()
                    .insert(column.clone(), [evt.value()].into());
            }
        };

        return rsx! {
            div {
                style: "margin: 8px 0;",
                label {
                    r#for: "{select_id}",
                    style: "font-weight: bold; margin-right: 8px;",
                    "{control.label}: "
                }
                select {
                    id: "{select_id}",
                    onchange: on_change,
                    for choice in control.choices.iter() {
                        option {
                            value: "{choice}",
                            selected: picked.contains(choice),
                            "{choice}"
                        }
                    }
                }
            }
        };
    }

    rsx! {
        fieldset {
            id: "{select_id}",
            style: "margin: 8px 0; border: 1px solid #e0e0e0; border-radius: 4px; padding: 4px 10px;",
            legend {
                style: "font-weight: bold; font-size: 13px;",
                "{control.label}"
            }
            for choice in control.choices.iter() {
                ChoiceCheckbox {
                    key: "{choice}",
                    column: column.clone(),
                    choice: choice.clone(),
                    checked: picked.contains(choice),
                }
            }
        }
    }
}

/// One tickable option of a multi-select.
#[component]
fn ChoiceCheckbox(column: String, choice: String, checked: bool) -> Element {
    let mut state = use_context::<AppState>();

    let on_change = {
        let column = column.clone();
        let choice = choice.clone();
        move |evt: Event<FormData>| {
            let mut keys = state.category_keys.write();
            let picked = keys.entry(column.clone()).or_default();
            if evt.checked() {
                picked.insert(choice.clone());
            } else {
                picked.remove(&choice);
            }
        }
    };

    rsx! {
        label {
            style: "margin-right: 12px; font-size: 13px; white-space: nowrap;",
            input {
                r#type: "checkbox",
                value: "{choice}",
                checked,
                onchange: on_change,
            }
            " {choice}"
        }
    }
}

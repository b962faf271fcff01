//! Two-handled numeric range control.

use crate::state::AppState;
use dioxus::prelude::*;

/// Lower and upper sliders for the dashboard's range control.
///
/// Dragging one handle past the other pushes it along, so the range never
/// inverts. Renders nothing when the dashboard has no range control.
#[component]
pub fn RangeSlider() -> Element {
    let mut state = use_context::<AppState>();
    let Some(control) = state.config.read().range.clone() else {
        return rsx! {};
    };
    let Some(current) = state.range.read().clone() else {
        return rsx! {};
    };

    let on_min = move |evt: Event<FormData>| {
        if let Ok(min) = evt.value().parse::<f64>() {
            let next = state.range.read().as_ref().map(|r| r.with_min(min));
            state.range.set(next);
        }
    };
    let on_max = move |evt: Event<FormData>| {
        if let Ok(max) = evt.value().parse::<f64>() {
            let next = state.range.read().as_ref().map(|r| r.with_max(max));
            state.range.set(next);
        }
    };

    let lo = dash_data::value::format_number(current.min);
    let hi = dash_data::value::format_number(current.max);

    rsx! {
        div {
            style: "margin: 8px 0;",
            div {
                style: "font-weight: bold; margin-bottom: 4px;",
                "{control.label}: {lo} to {hi}"
            }
            div {
                style: "display: flex; gap: 12px; align-items: center;",
                input {
                    r#type: "range",
                    min: "{control.min}",
                    max: "{control.max}",
                    step: "{control.step}",
                    value: "{current.min}",
                    style: "flex: 1;",
                    oninput: on_min,
                }
                input {
                    r#type: "range",
                    min: "{control.min}",
                    max: "{control.max}",
                    step: "{control.step}",
                    value: "{current.max}",
                    style: "flex: 1;",
                    oninput: on_max,
                }
            }
        }
    }
}

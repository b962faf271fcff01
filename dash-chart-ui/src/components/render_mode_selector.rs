//! Render mode dropdown.

use crate::state::AppState;
use dash_data::render::RenderMode;
use dioxus::prelude::*;

/// Picks which configured view fills the main output.
#[component]
pub fn RenderModeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let modes = state.config.read().modes();
    let current = (state.render_mode)();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<RenderMode>() {
        Ok(mode) => state.render_mode.set(mode),
        Err(e) => log::warn!("[Dash] render mode: {}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "render-mode-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Render mode: "
            }
            select {
                id: "render-mode-select",
                onchange: on_change,
                for mode in modes {
                    option {
                        value: mode.as_str(),
                        selected: mode == current,
                        {mode.label()}
                    }
                }
            }
        }
    }
}

//! All input controls of a dashboard, laid out in one panel.

use super::{CategorySelector, RangeSlider, RenderModeSelector};
use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ControlsPanelProps {
    /// Include the render mode dropdown
    #[props(default = true)]
    pub show_mode: bool,
}

#[component]
pub fn ControlsPanel(props: ControlsPanelProps) -> Element {
    let state = use_context::<AppState>();
    let columns: Vec<String> = state
        .config
        .read()
        .categories
        .iter()
        .map(|c| c.column.clone())
        .collect();

    rsx! {
        div {
            style: "margin: 8px 0 16px 0; padding: 8px 12px; background: #f9f9f9; border: 1px solid #e0e0e0; border-radius: 4px;",
            for column in columns {
                CategorySelector { key: "{column}", column: column.clone() }
            }
            RangeSlider {}
            if props.show_mode {
                RenderModeSelector {}
            }
        }
    }
}

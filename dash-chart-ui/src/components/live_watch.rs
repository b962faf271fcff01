//! Decorative elapsed-time counter.

use crate::js_bridge;
use dioxus::prelude::*;

/// Ticking `hh:mm:ss` clock. Runs entirely in JS and never touches app state,
/// so it cannot trigger a re-filter.
#[component]
pub fn LiveWatch(id: String) -> Element {
    let start_id = id.clone();
    use_effect(move || js_bridge::start_live_watch(&start_id));
    let stop_id = id.clone();
    use_drop(move || js_bridge::stop_live_watch(&stop_id));

    rsx! {
        div {
            style: "margin: 8px 0; font-size: 12px; color: #555;",
            "Session time: "
            span {
                id: "{id}",
                style: "font-family: monospace; font-weight: bold;",
                "00:00:00"
            }
        }
    }
}

//! Interactive Dashboard: Restaurant Tips Data
//!
//! One "time of day" select drives two outputs that are always on screen:
//! the filtered rows as a table and total bill vs tip as a bar chart.
//!
//! Data flow:
//! 1. On mount: fetch the tips CSV. A failed fetch leaves an empty dataset
//!    and a diagnostic banner; the page still renders.
//! 2. On select change: the filtered-view memo re-runs, then both artifact
//!    memos, then the bar chart is redrawn via D3.js.

use dash_chart_ui::components::{
    ArtifactView, ChartHeader, ControlsPanel, ErrorDisplay, LoadingSpinner,
};
use dash_chart_ui::js_bridge;
use dash_chart_ui::pipeline::{use_chart_renderer, use_filtered_view, use_fixed_artifact};
use dash_chart_ui::state::AppState;
use dash_data::config::DashboardConfig;
use dash_data::loader;
use dash_data::render::RenderMode;
use dioxus::prelude::*;

/// DOM id for the D3 bar chart container div.
const BAR_CONTAINER_ID: &str = "tips-bar-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("tips-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(|| AppState::new(DashboardConfig::tips()));

    // ─── Effect 1: Load the CSV once on mount ───
    use_effect(move || {
        let source = state.config.peek().source.clone();
        js_bridge::init_charts();
        spawn(async move {
            log::info!("[Dash] tips: loading {}", source);
            let outcome = loader::load_or_empty(&source, js_bridge::fetch_text(&source).await);
            log::info!("[Dash] tips: {} rows", outcome.dataset.row_count());
            state.finish_loading(outcome);
        });
    });

    // ─── Pipeline: selection -> filtered rows -> table + bar chart ───
    let view = use_filtered_view(state);
    let table = use_fixed_artifact(state, view, RenderMode::Table);
    let bar = use_fixed_artifact(state, view, RenderMode::Bar);
    use_chart_renderer(BAR_CONTAINER_ID, bar);

    let title = state.config.read().title.clone();
    let source = state.config.read().source.clone();

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            ChartHeader { title: title }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner { source: source }
            } else {
                ControlsPanel { show_mode: false }

                ArtifactView { id: "tips-table".to_string(), artifact: table() }
                ArtifactView { id: BAR_CONTAINER_ID.to_string(), artifact: bar() }
            }
        }
    }
}

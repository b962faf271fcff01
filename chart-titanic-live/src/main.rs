//! Titanic Passenger Explorer with a live session clock.
//!
//! Same controls and outputs as the plain explorer. The clock ticks in JS
//! once a second and is not an input to the pipeline.

use dash_chart_ui::components::{
    ArtifactView, ChartHeader, ControlsPanel, ErrorDisplay, LiveWatch, LoadingSpinner,
};
use dash_chart_ui::js_bridge;
use dash_chart_ui::pipeline::{use_chart_renderer, use_filtered_view, use_selected_artifact};
use dash_chart_ui::state::AppState;
use dash_data::config::DashboardConfig;
use dash_data::loader;
use dioxus::prelude::*;

const CHART_CONTAINER_ID: &str = "titanic-live-chart";
const WATCH_ID: &str = "titanic-live-watch";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("titanic-live-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(|| {
        let mut config = DashboardConfig::titanic();
        config.title = "Titanic Passenger Explorer (Live)".to_string();
        AppState::new(config)
    });

    use_effect(move || {
        let source = state.config.peek().source.clone();
        js_bridge::init_charts();
        spawn(async move {
            log::info!("[Dash] titanic-live: loading {}", source);
            let outcome = loader::load_or_empty(&source, js_bridge::fetch_text(&source).await);
            state.finish_loading(outcome);
        });
    });

    let view = use_filtered_view(state);
    let artifact = use_selected_artifact(state, view);
    use_chart_renderer(CHART_CONTAINER_ID, artifact);

    let title = state.config.read().title.clone();
    let source = state.config.read().source.clone();

    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            ChartHeader { title: title }
            LiveWatch { id: WATCH_ID.to_string() }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner { source: source }
            } else {
                ControlsPanel {}
                ArtifactView { id: CHART_CONTAINER_ID.to_string(), artifact: artifact() }
            }
        }
    }
}

//! Reactive filter-render pipeline.
//!
//! The Dioxus runtime does the dependency tracking: a memo re-runs when a
//! signal it read during its last run is written. The filtered view memo
//! reads the dataset and the selection signals; each artifact memo reads the
//! filtered view and (for switchable outputs) the render mode. Memos compare
//! their new value with the old one, so a control change that does not alter
//! the filtered rows stops here.

use crate::js_bridge;
use crate::state::AppState;
use dash_data::filter::build_filter;
use dash_data::models::Artifact;
use dash_data::render::{render, RenderMode};
use dash_data::FilteredView;
use dioxus::prelude::*;

/// Rows of the dataset passing the current selection.
pub fn use_filtered_view(state: AppState) -> Memo<FilteredView> {
    use_memo(move || {
        let config = state.config.read();
        let keys = state.category_keys.read();
        let range = state.range.read();
        let dataset = state.dataset.read();

        let Some(dataset) = dataset.as_ref() else {
            return FilteredView::default();
        };
        let selection = config.selection(&keys, range.as_ref());
        let view = dataset.filter(&build_filter(dataset, &selection));
        log::debug!(
            "[Dash Debug] pipeline: {} of {} rows selected",
            view.len(),
            dataset.row_count()
        );
        view
    })
}

/// Artifact for whatever the render-mode selector currently says.
pub fn use_selected_artifact(state: AppState, view: Memo<FilteredView>) -> Memo<Artifact> {
    use_memo(move || {
        let mode = (state.render_mode)();
        render(&state.config.read().views, mode, &view.read())
    })
}

/// Artifact for one fixed render mode (outputs that are always on screen).
pub fn use_fixed_artifact(state: AppState, view: Memo<FilteredView>, mode: RenderMode) -> Memo<Artifact> {
    use_memo(move || render(&state.config.read().views, mode, &view.read()))
}

/// Push chart artifacts to D3 whenever they change; clear the container otherwise.
pub fn use_chart_renderer(container_id: &'static str, artifact: Memo<Artifact>) {
    use_effect(move || {
        let artifact = artifact();
        if artifact.is_chart() {
            js_bridge::render_chart(container_id, &artifact);
        } else {
            js_bridge::destroy_chart(container_id);
        }
    });
}

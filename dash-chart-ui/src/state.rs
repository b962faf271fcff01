//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! Controls write the selection signals; the pipeline memos only read them.

use dash_data::config::{CategoryKeys, DashboardConfig};
use dash_data::filter::RangeSelection;
use dash_data::render::RenderMode;
use dash_data::Dataset;
use dioxus::prelude::*;

/// Shared application state for all dashboard apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Controls, views and data source of this dashboard
    pub config: Signal<DashboardConfig>,
    /// Loaded dataset (None until the startup fetch finishes)
    pub dataset: Signal<Option<Dataset>>,
    /// Whether the startup fetch is still running
    pub loading: Signal<bool>,
    /// Loader diagnostic or configuration conflict, shown above the controls
    pub error_msg: Signal<Option<String>>,
    /// Ticked category keys per categorical column
    pub category_keys: Signal<CategoryKeys>,
    /// Current numeric range, if the dashboard has a range control
    pub range: Signal<Option<RangeSelection>>,
    /// Current render mode selector value
    pub render_mode: Signal<RenderMode>,
}

impl AppState {
    /// Create a new AppState with every control at its configured default.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            dataset: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            category_keys: Signal::new(config.default_keys()),
            range: Signal::new(config.initial_range()),
            render_mode: Signal::new(config.default_mode),
            config: Signal::new(config),
        }
    }

    /// Install a load result: the dataset (possibly the empty fallback) and
    /// any diagnostic, plus a warning for categories holding the all-token.
    pub fn finish_loading(&mut self, outcome: dash_data::loader::LoadOutcome) {
        let mut messages: Vec<String> = outcome.diagnostic.into_iter().collect();

        let conflicts = {
            let config = self.config.read();
            outcome
                .dataset
                .sentinel_conflicts(&config.all_token, &config.categorical_columns())
                .into_iter()
                .map(|column| {
                    format!(
                        "Column '{}' contains a literal '{}' value; it is treated as \"every category\". Set a different all_token to select it.",
                        column, config.all_token
                    )
                })
                .collect::<Vec<_>>()
        };
        for conflict in &conflicts {
            log::warn!("[Dash] state: {}", conflict);
        }
        messages.extend(conflicts);

        self.error_msg.set(if messages.is_empty() {
            None
        } else {
            Some(messages.join(" "))
        });
        self.dataset.set(Some(outcome.dataset));
        self.loading.set(false);
    }
}

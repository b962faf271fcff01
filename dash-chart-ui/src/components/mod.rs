//! Reusable Dioxus RSX components for the dashboard apps.

mod artifact_view;
mod category_selector;
mod chart_container;
mod chart_header;
mod controls_panel;
mod data_table;
mod error_display;
mod live_watch;
mod loading_spinner;
mod range_slider;
mod render_mode_selector;

pub use artifact_view::{ArtifactView, NoDataNotice};
pub use category_selector::CategorySelector;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use controls_panel::ControlsPanel;
pub use data_table::DataTable;
pub use error_display::ErrorDisplay;
pub use live_watch::LiveWatch;
pub use loading_spinner::LoadingSpinner;
pub use range_slider::RangeSlider;
pub use render_mode_selector::RenderModeSelector;

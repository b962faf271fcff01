//! Render artifacts handed to the UI.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend, or printed by the CLI. Field names are
//! camelCase to match the chart scripts.

use serde::Serialize;

/// Notice shown instead of a table or chart when nothing is left to draw.
pub const NO_DATA_MESSAGE: &str = "No data available for the current selection.";

/// The output of one render function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Artifact {
    Table(TableView),
    Bar(BarChart),
    Scatter(ScatterChart),
    Histogram(HistogramChart),
    BoxPlot(BoxPlotChart),
    NoData(NoData),
}

impl Artifact {
    pub fn no_data() -> Self {
        Artifact::NoData(NoData {
            message: NO_DATA_MESSAGE.to_string(),
        })
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Artifact::NoData(_))
    }

    /// True for artifacts drawn by a D3 chart script.
    pub fn is_chart(&self) -> bool {
        matches!(
            self,
            Artifact::Bar(_) | Artifact::Scatter(_) | Artifact::Histogram(_) | Artifact::BoxPlot(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoData {
    pub message: String,
}

/// Table cells already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows in the filtered view before `max_rows` truncation.
    pub total_rows: usize,
}

impl TableView {
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }
}

/// A colour group in a chart legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub color: String,
}

/// One mark positioned by two numbers and tagged with its colour group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Point>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<Point>,
    pub groups: Vec<Group>,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub bins: Vec<HistogramBin>,
    pub x_ticks: Vec<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStats {
    pub group: String,
    pub color: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxPlotChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub boxes: Vec<BoxStats>,
    pub y_ticks: Vec<f64>,
}

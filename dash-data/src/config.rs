//! Dashboard configuration: which controls exist and which views render.
//!
//! The three apps build their config from the presets below; the CLI can
//! also read one from JSON, so a dataset with a literal "All" category can
//! switch to a different `all_token` without code changes.

use crate::error::{DataError, Result};
use crate::filter::{CategorySelection, RangeSelection, Selection, ALL_TOKEN};
use crate::render::{
    BoxPlotConfig, HistogramConfig, RenderMode, ScatterConfig, TableConfig, View,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Seaborn's restaurant tips dataset.
pub const TIPS_CSV_URL: &str =
    "https://raw.githubusercontent.com/mwaskom/seaborn-data/master/tips.csv";

/// Titanic passenger manifest.
pub const TITANIC_CSV_URL: &str =
    "https://raw.githubusercontent.com/datasciencedojo/datasets/master/titanic.csv";

/// Control state keyed by column: the category keys currently ticked.
pub type CategoryKeys = BTreeMap<String, BTreeSet<String>>;

/// A select or multi-select bound to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryControl {
    pub column: String,
    pub label: String,
    /// Options in display order. May include the all-token.
    pub choices: Vec<String>,
    #[serde(default)]
    pub multiple: bool,
    pub default: Vec<String>,
}

/// A two-handled slider bound to one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeControl {
    pub column: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    pub default: (f64, f64),
}

fn default_step() -> f64 {
    1.0
}

fn default_all_token() -> String {
    ALL_TOKEN.to_string()
}

/// Everything one dashboard needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: String,
    /// Path or URL of the CSV to load at startup.
    pub source: String,
    /// Selection value that means "every category".
    #[serde(default = "default_all_token")]
    pub all_token: String,
    #[serde(default)]
    pub categories: Vec<CategoryControl>,
    #[serde(default)]
    pub range: Option<RangeControl>,
    pub views: Vec<View>,
    pub default_mode: RenderMode,
}

impl DashboardConfig {
    /// Restaurant tips: one "time of day" select, a table and a bar chart.
    pub fn tips() -> Self {
        Self {
            title: "Interactive Dashboard: Restaurant Tips Data".to_string(),
            source: TIPS_CSV_URL.to_string(),
            all_token: default_all_token(),
            categories: vec![CategoryControl {
                column: "time".to_string(),
                label: "Select Time of Day".to_string(),
                choices: vec!["Lunch".to_string(), "Dinner".to_string()],
                multiple: false,
                default: vec!["Lunch".to_string()],
            }],
            range: None,
            views: vec![
                View::Table(TableConfig {
                    title: "Filtered Tips".to_string(),
                    columns: Vec::new(),
                    max_rows: None,
                }),
                View::Bar(crate::render::BarConfig {
                    title: "Total Bill vs Tip (Filtered by Time of Day)".to_string(),
                    x: "total_bill".to_string(),
                    y: "tip".to_string(),
                    color: Some("day".to_string()),
                }),
            ],
            default_mode: RenderMode::Table,
        }
    }

    /// Titanic passengers: class and sex multi-selects, an age slider, and
    /// four interchangeable views.
    pub fn titanic() -> Self {
        let tens = |to: u32| (0..=to).step_by(10).map(f64::from).collect::<Vec<_>>();
        let fares = vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0];
        Self {
            title: "Titanic Passenger Explorer".to_string(),
            source: TITANIC_CSV_URL.to_string(),
            all_token: default_all_token(),
            categories: vec![
                CategoryControl {
                    column: "pclass".to_string(),
                    label: "Passenger class".to_string(),
                    choices: ["All", "1", "2", "3"].map(String::from).to_vec(),
                    multiple: true,
                    default: vec![ALL_TOKEN.to_string()],
                },
                CategoryControl {
                    column: "sex".to_string(),
                    label: "Sex".to_string(),
                    choices: ["All", "male", "female"].map(String::from).to_vec(),
                    multiple: true,
                    default: vec![ALL_TOKEN.to_string()],
                },
            ],
            range: Some(RangeControl {
                column: "age".to_string(),
                label: "Age range".to_string(),
                min: 0.0,
                max: 80.0,
                step: 1.0,
                default: (0.0, 80.0),
            }),
            views: vec![
                View::Scatter(ScatterConfig {
                    title: "Age vs Fare".to_string(),
                    x: "age".to_string(),
                    y: "fare".to_string(),
                    color: Some("survived".to_string()),
                    x_ticks: tens(80),
                    y_ticks: fares.clone(),
                }),
                View::Histogram(HistogramConfig {
                    title: "Age Distribution".to_string(),
                    column: "age".to_string(),
                    bin_width: 5.0,
                    domain: Some((0.0, 80.0)),
                    x_ticks: tens(80),
                }),
                View::Table(TableConfig {
                    title: "Passengers".to_string(),
                    columns: ["survived", "pclass", "name", "sex", "age", "fare"]
                        .map(String::from)
                        .to_vec(),
                    max_rows: None,
                }),
                View::BoxPlot(BoxPlotConfig {
                    title: "Fare by Passenger Class".to_string(),
                    value: "fare".to_string(),
                    group: Some("pclass".to_string()),
                    y_ticks: fares,
                }),
            ],
            default_mode: RenderMode::Scatter,
        }
    }

    /// Look up a preset by name (`tips` or `titanic`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tips" => Some(Self::tips()),
            "titanic" => Some(Self::titanic()),
            _ => None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DataError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Reject configurations the dashboards could not render.
    pub fn validate(&self) -> Result<()> {
        if self.views.is_empty() {
            return Err(DataError::Config("at least one view is required".into()));
        }
        if !self.modes().contains(&self.default_mode) {
            return Err(DataError::Config(format!(
                "default_mode '{}' has no view",
                self.default_mode
            )));
        }
        for control in &self.categories {
            if let Some(bad) = control.default.iter().find(|d| !control.choices.contains(d)) {
                return Err(DataError::Config(format!(
                    "default '{}' is not a choice of '{}'",
                    bad, control.column
                )));
            }
        }
        for view in &self.views {
            if let View::Histogram(histogram) = view {
                if !(histogram.bin_width > 0.0) || !histogram.bin_width.is_finite() {
                    return Err(DataError::Config(format!(
                        "histogram '{}' needs a positive bin_width",
                        histogram.title
                    )));
                }
            }
        }
        if let Some(range) = &self.range {
            if range.min > range.max {
                return Err(DataError::Config(format!(
                    "range '{}' has min above max",
                    range.column
                )));
            }
        }
        Ok(())
    }

    /// Render modes offered, in view order.
    pub fn modes(&self) -> Vec<RenderMode> {
        self.views.iter().map(View::mode).collect()
    }

    pub fn categorical_columns(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.column.as_str()).collect()
    }

    /// Control defaults as the UI stores them.
    pub fn default_keys(&self) -> CategoryKeys {
        self.categories
            .iter()
            .map(|c| (c.column.clone(), c.default.iter().cloned().collect()))
            .collect()
    }

    pub fn initial_range(&self) -> Option<RangeSelection> {
        self.range
            .as_ref()
            .map(|r| RangeSelection::new(r.column.clone(), r.default.0, r.default.1))
    }

    /// Turn the raw control state into a [`Selection`].
    ///
    /// Controls missing from `keys` fall back to their defaults.
    pub fn selection(&self, keys: &CategoryKeys, range: Option<&RangeSelection>) -> Selection {
        let mut selection = Selection::new();
        for control in &self.categories {
            let choice = match keys.get(&control.column) {
                Some(picked) => CategorySelection::from_keys(picked.iter().cloned(), &self.all_token),
                None => CategorySelection::from_keys(control.default.iter().cloned(), &self.all_token),
            };
            selection = selection.with_category(control.column.clone(), choice);
        }
        if let Some(range) = range.cloned().or_else(|| self.initial_range()) {
            selection = selection.with_range(range);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        DashboardConfig::tips().validate().unwrap();
        DashboardConfig::titanic().validate().unwrap();
        assert!(DashboardConfig::preset("Titanic").is_some());
        assert!(DashboardConfig::preset("iris").is_none());
    }

    #[test]
    fn titanic_offers_four_modes() {
        assert_eq!(
            DashboardConfig::titanic().modes(),
            vec![
                RenderMode::Scatter,
                RenderMode::Histogram,
                RenderMode::Table,
                RenderMode::BoxPlot
            ]
        );
    }

    #[test]
    fn config_reads_back_from_json() {
        let json = serde_json::to_string_pretty(&DashboardConfig::titanic()).unwrap();
        assert!(json.contains("\"kind\": \"box\""));
        let parsed = DashboardConfig::from_json(&json).unwrap();
        assert_eq!(parsed, DashboardConfig::titanic());
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let json = r#"{
            "title": "Tips",
            "source": "fixtures/tips_sample.csv",
            "views": [{"kind": "table", "title": "All tips"}],
            "default_mode": "table"
        }"#;
        let config = DashboardConfig::from_json(json).unwrap();
        assert_eq!(config.all_token, "All");
        assert!(config.categories.is_empty());
        assert!(config.range.is_none());
    }

    #[test]
    fn default_mode_must_have_a_view() {
        let json = r#"{
            "title": "Tips",
            "source": "tips.csv",
            "views": [{"kind": "table", "title": "All tips"}],
            "default_mode": "scatter"
        }"#;
        assert!(matches!(DashboardConfig::from_json(json), Err(DataError::Config(_))));
    }

    #[test]
    fn histogram_bin_width_must_be_positive() {
        for width in ["0", "-5", "1e-400"] {
            let json = format!(
                r#"{{
                    "title": "Ages",
                    "source": "titanic.csv",
                    "views": [{{"kind": "histogram", "title": "Age", "column": "age", "bin_width": {width}}}],
                    "default_mode": "histogram"
                }}"#
            );
            assert!(
                matches!(DashboardConfig::from_json(&json), Err(DataError::Config(_))),
                "bin_width {width} accepted"
            );
        }
    }

    #[test]
    fn tiny_bin_width_renders_no_data_instead_of_allocating() {
        let json = r#"{
            "title": "Ages",
            "source": "titanic.csv",
            "views": [{"kind": "histogram", "title": "Age", "column": "age",
                       "bin_width": 1e-12, "domain": [0, 80]}],
            "default_mode": "histogram"
        }"#;
        let config = DashboardConfig::from_json(json).unwrap();
        let data = crate::loader::parse_csv("age\n22\n38\n").unwrap().all_rows();
        let artifact = crate::render::render(&config.views, RenderMode::Histogram, &data);
        assert!(artifact.is_no_data());
    }

    #[test]
    fn selection_uses_configured_all_token() {
        let mut config = DashboardConfig::titanic();
        config.all_token = "Any".to_string();

        let mut keys = CategoryKeys::new();
        keys.insert("pclass".into(), ["Any".to_string()].into());
        keys.insert("sex".into(), ["All".to_string()].into());
        let selection = config.selection(&keys, None);

        assert_eq!(selection.categories[0].1, CategorySelection::All);
        // With a custom token, "All" is an ordinary key
        assert_eq!(
            selection.categories[1].1,
            CategorySelection::Only(["All".to_string()].into())
        );
        assert_eq!(selection.range, config.initial_range());
    }

    #[test]
    fn missing_controls_fall_back_to_defaults() {
        let config = DashboardConfig::tips();
        let selection = config.selection(&CategoryKeys::new(), None);
        assert_eq!(selection.categories.len(), 1);
        assert_eq!(
            selection.categories[0],
            (
                "time".to_string(),
                CategorySelection::Only(["Lunch".to_string()].into())
            )
        );
        assert!(selection.range.is_none());
    }
}

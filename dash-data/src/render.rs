//! Render dispatch: from a render mode and a filtered view to an artifact.
//!
//! Each dashboard configures a list of [`View`]s, one per render mode it
//! offers. [`render`] picks the view for the current mode and runs it. Every
//! view answers an empty filtered view with [`Artifact::NoData`], and so does
//! a chart whose columns hold no usable numbers.

use crate::models::{
    Artifact, BarChart, BoxPlotChart, BoxStats, Group, HistogramBin, HistogramChart, Point,
    ScatterChart, TableView,
};
use crate::stats;
use crate::value::Value;
use crate::FilteredView;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Qualitative palette assigned to colour groups in sorted order.
pub const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Legend name for rows whose group cell is empty.
const MISSING_GROUP: &str = "(missing)";

// ───────────────────── Render modes ─────────────────────

/// The value of a render-mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Table,
    Bar,
    Scatter,
    Histogram,
    #[serde(rename = "box")]
    BoxPlot,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Table => "table",
            RenderMode::Bar => "bar",
            RenderMode::Scatter => "scatter",
            RenderMode::Histogram => "histogram",
            RenderMode::BoxPlot => "box",
        }
    }

    /// Human label for selector options.
    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Table => "Table",
            RenderMode::Bar => "Bar chart",
            RenderMode::Scatter => "Scatter plot",
            RenderMode::Histogram => "Histogram",
            RenderMode::BoxPlot => "Box plot",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(RenderMode::Table),
            "bar" => Ok(RenderMode::Bar),
            "scatter" => Ok(RenderMode::Scatter),
            "histogram" | "hist" => Ok(RenderMode::Histogram),
            "box" | "boxplot" | "box_plot" => Ok(RenderMode::BoxPlot),
            other => Err(format!("unknown render mode '{}'", other)),
        }
    }
}

// ───────────────────── View configuration ─────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub title: String,
    /// Columns to show, in order. Empty shows every column.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub max_rows: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    pub title: String,
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    pub title: String,
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub x_ticks: Vec<f64>,
    #[serde(default)]
    pub y_ticks: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    pub title: String,
    pub column: String,
    pub bin_width: f64,
    /// Fixed bin range; derived from the data when absent.
    #[serde(default)]
    pub domain: Option<(f64, f64)>,
    #[serde(default)]
    pub x_ticks: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotConfig {
    pub title: String,
    pub value: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub y_ticks: Vec<f64>,
}

/// One render function together with its fixed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum View {
    Table(TableConfig),
    Bar(BarConfig),
    Scatter(ScatterConfig),
    Histogram(HistogramConfig),
    #[serde(rename = "box")]
    BoxPlot(BoxPlotConfig),
}

impl View {
    pub fn mode(&self) -> RenderMode {
        match self {
            View::Table(_) => RenderMode::Table,
            View::Bar(_) => RenderMode::Bar,
            View::Scatter(_) => RenderMode::Scatter,
            View::Histogram(_) => RenderMode::Histogram,
            View::BoxPlot(_) => RenderMode::BoxPlot,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            View::Table(c) => &c.title,
            View::Bar(c) => &c.title,
            View::Scatter(c) => &c.title,
            View::Histogram(c) => &c.title,
            View::BoxPlot(c) => &c.title,
        }
    }

    pub fn render(&self, data: &FilteredView) -> Artifact {
        if data.is_empty() {
            return Artifact::no_data();
        }
        let artifact = match self {
            View::Table(c) => render_table(c, data),
            View::Bar(c) => render_bar(c, data),
            View::Scatter(c) => render_scatter(c, data),
            View::Histogram(c) => render_histogram(c, data),
            View::BoxPlot(c) => render_box_plot(c, data),
        };
        artifact.unwrap_or_else(Artifact::no_data)
    }
}

/// Pick the view configured for `mode` and run it.
///
/// A mode no view is configured for yields the no-data notice.
pub fn render(views: &[View], mode: RenderMode, data: &FilteredView) -> Artifact {
    match views.iter().find(|v| v.mode() == mode) {
        Some(view) => view.render(data),
        None => {
            log::warn!("[Dash] render: no view configured for mode '{}'", mode);
            Artifact::no_data()
        }
    }
}

// ───────────────────── Render functions ─────────────────────

fn render_table(config: &TableConfig, data: &FilteredView) -> Option<Artifact> {
    let mut picked: Vec<(usize, String)> = config
        .columns
        .iter()
        .filter_map(|name| data.column_index(name).map(|i| (i, name.clone())))
        .collect();
    if picked.is_empty() {
        picked = data
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.name.clone()))
            .collect();
    }

    let limit = config.max_rows.unwrap_or(usize::MAX);
    let rows = data
        .rows()
        .iter()
        .take(limit)
        .map(|row| {
            picked
                .iter()
                .map(|(i, _)| row.cells.get(*i).map(Value::key).unwrap_or_default())
                .collect()
        })
        .collect();

    Some(Artifact::Table(TableView {
        title: config.title.clone(),
        columns: picked.into_iter().map(|(_, name)| name).collect(),
        rows,
        total_rows: data.len(),
    }))
}

fn render_bar(config: &BarConfig, data: &FilteredView) -> Option<Artifact> {
    let (bars, groups) = grouped_points(data, &config.x, &config.y, config.color.as_deref())?;
    Some(Artifact::Bar(BarChart {
        title: config.title.clone(),
        x_label: config.x.clone(),
        y_label: config.y.clone(),
        bars,
        groups,
    }))
}

fn render_scatter(config: &ScatterConfig, data: &FilteredView) -> Option<Artifact> {
    let (points, groups) = grouped_points(data, &config.x, &config.y, config.color.as_deref())?;
    Some(Artifact::Scatter(ScatterChart {
        title: config.title.clone(),
        x_label: config.x.clone(),
        y_label: config.y.clone(),
        points,
        groups,
        x_ticks: config.x_ticks.clone(),
        y_ticks: config.y_ticks.clone(),
    }))
}

fn render_histogram(config: &HistogramConfig, data: &FilteredView) -> Option<Artifact> {
    let values: Vec<f64> = data.numbers(&config.column).collect();
    if values.is_empty() {
        return None;
    }
    let domain = config.domain.unwrap_or_else(|| {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lo = (lo / config.bin_width).floor() * config.bin_width;
        (lo, hi)
    });
    let bins = stats::histogram(&values, config.bin_width, domain);
    if bins.iter().all(|b| b.count == 0) {
        return None;
    }
    Some(Artifact::Histogram(HistogramChart {
        title: config.title.clone(),
        x_label: config.column.clone(),
        bins: bins
            .into_iter()
            .map(|b| HistogramBin {
                x0: b.x0,
                x1: b.x1,
                count: b.count,
            })
            .collect(),
        x_ticks: config.x_ticks.clone(),
        color: PALETTE[0].to_string(),
    }))
}

fn render_box_plot(config: &BoxPlotConfig, data: &FilteredView) -> Option<Artifact> {
    let value_idx = data.column_index(&config.value)?;
    let group_idx = config.group.as_deref().and_then(|g| data.column_index(g));

    let mut buckets: Vec<(Value, Vec<f64>)> = Vec::new();
    for row in data.rows() {
        let Some(v) = row.cells.get(value_idx).and_then(Value::as_f64) else {
            continue;
        };
        let key = group_idx
            .and_then(|i| row.cells.get(i).cloned())
            .unwrap_or(Value::Missing);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(v),
            None => buckets.push((key, vec![v])),
        }
    }
    buckets.sort_by(|a, b| compare_values(&a.0, &b.0));

    let single = group_idx.is_none();
    let boxes: Vec<BoxStats> = buckets
        .iter()
        .enumerate()
        .filter_map(|(i, (key, values))| {
            let s = stats::box_summary(values)?;
            Some(BoxStats {
                group: if single { config.value.clone() } else { group_name(key) },
                color: PALETTE[i % PALETTE.len()].to_string(),
                count: s.count,
                min: s.min,
                q1: s.q1,
                median: s.median,
                q3: s.q3,
                max: s.max,
                lower_whisker: s.lower_whisker,
                upper_whisker: s.upper_whisker,
                outliers: s.outliers,
            })
        })
        .collect();
    if boxes.is_empty() {
        return None;
    }

    Some(Artifact::BoxPlot(BoxPlotChart {
        title: config.title.clone(),
        x_label: config.group.clone().unwrap_or_default(),
        y_label: config.value.clone(),
        boxes,
        y_ticks: config.y_ticks.clone(),
    }))
}

// ───────────────────── Helpers ─────────────────────

/// Points with both coordinates numeric, plus the legend for their groups.
fn grouped_points(
    data: &FilteredView,
    x: &str,
    y: &str,
    color: Option<&str>,
) -> Option<(Vec<Point>, Vec<Group>)> {
    let xi = data.column_index(x)?;
    let yi = data.column_index(y)?;
    let ci = color.and_then(|c| data.column_index(c));

    let mut keyed: Vec<(f64, f64, Value)> = Vec::new();
    for row in data.rows() {
        let (Some(xv), Some(yv)) = (
            row.cells.get(xi).and_then(Value::as_f64),
            row.cells.get(yi).and_then(Value::as_f64),
        ) else {
            continue;
        };
        let group = ci
            .and_then(|i| row.cells.get(i).cloned())
            .unwrap_or(Value::Missing);
        keyed.push((xv, yv, group));
    }
    if keyed.is_empty() {
        return None;
    }

    let mut distinct: Vec<Value> = Vec::new();
    for (_, _, g) in &keyed {
        if !distinct.contains(g) {
            distinct.push(g.clone());
        }
    }
    distinct.sort_by(compare_values);

    let groups: Vec<Group> = distinct
        .iter()
        .enumerate()
        .map(|(i, g)| Group {
            name: if ci.is_some() { group_name(g) } else { y.to_string() },
            color: PALETTE[i % PALETTE.len()].to_string(),
        })
        .collect();

    let points = keyed
        .into_iter()
        .map(|(x, y_val, g)| Point {
            x,
            y: y_val,
            group: if ci.is_some() { group_name(&g) } else { y.to_string() },
        })
        .collect();

    Some((points, groups))
}

fn group_name(value: &Value) -> String {
    match value {
        Value::Missing => MISSING_GROUP.to_string(),
        other => other.key(),
    }
}

/// Numbers ascending, then text, then missing.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        (Value::Missing, Value::Missing) => Ordering::Equal,
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        (Value::Text(_), Value::Missing) => Ordering::Less,
        (Value::Missing, Value::Text(_)) => Ordering::Greater,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::filter::{build_filter, CategorySelection, RangeSelection, Selection};
    use crate::loader::{load_or_empty, parse_csv};
    use crate::models::NO_DATA_MESSAGE;

    const TITANIC: &str = include_str!("../../fixtures/titanic_sample.csv");
    const TIPS: &str = include_str!("../../fixtures/tips_sample.csv");

    fn titanic_view() -> FilteredView {
        parse_csv(TITANIC).unwrap().all_rows()
    }

    const MODES: [RenderMode; 5] = [
        RenderMode::Table,
        RenderMode::Bar,
        RenderMode::Scatter,
        RenderMode::Histogram,
        RenderMode::BoxPlot,
    ];

    fn every_view() -> Vec<View> {
        let mut views = DashboardConfig::titanic().views;
        views.extend(DashboardConfig::tips().views);
        views
    }

    // ───────────────────── Dispatch tests ─────────────────────

    #[test]
    fn render_mode_parses_selector_values() {
        for mode in MODES {
            assert_eq!(mode.as_str().parse::<RenderMode>(), Ok(mode));
        }
        assert_eq!("Box Plot".replace(' ', "").parse::<RenderMode>(), Ok(RenderMode::BoxPlot));
        assert!("pie".parse::<RenderMode>().is_err());
    }

    #[test]
    fn dispatch_picks_the_view_for_the_mode() {
        let views = DashboardConfig::titanic().views;
        let data = titanic_view();
        assert!(matches!(render(&views, RenderMode::Scatter, &data), Artifact::Scatter(_)));
        assert!(matches!(render(&views, RenderMode::Histogram, &data), Artifact::Histogram(_)));
        assert!(matches!(render(&views, RenderMode::Table, &data), Artifact::Table(_)));
        assert!(matches!(render(&views, RenderMode::BoxPlot, &data), Artifact::BoxPlot(_)));
        // Titanic offers no bar chart
        assert!(render(&views, RenderMode::Bar, &data).is_no_data());
    }

    #[test]
    fn empty_view_yields_no_data_in_every_mode() {
        let ds = parse_csv(TITANIC).unwrap();
        let selection = Selection::new()
            .with_category("sex", CategorySelection::from_keys(["female"], "All"))
            .with_range(RangeSelection::new("age", 90.0, 100.0));
        let empty = ds.filter(&build_filter(&ds, &selection));
        assert!(empty.is_empty());

        for view in every_view() {
            match view.render(&empty) {
                Artifact::NoData(n) => assert_eq!(n.message, NO_DATA_MESSAGE),
                other => panic!("{:?} rendered {other:?} for an empty view", view.mode()),
            }
        }
    }

    #[test]
    fn failed_load_renders_no_data_everywhere() {
        let outcome = load_or_empty("https://example.invalid/titanic.csv", Err::<String, _>("HTTP 500"));
        let ds = outcome.dataset;
        let selection = Selection::new()
            .with_category("pclass", CategorySelection::All)
            .with_category("sex", CategorySelection::All)
            .with_range(RangeSelection::new("age", 0.0, 80.0));
        let view = ds.filter(&build_filter(&ds, &selection));
        for v in every_view() {
            assert!(v.render(&view).is_no_data());
        }
        for mode in MODES {
            assert!(render(&DashboardConfig::titanic().views, mode, &view).is_no_data());
        }
    }

    // ───────────────────── Table tests ─────────────────────

    #[test]
    fn table_keeps_configured_columns_and_counts() {
        let config = TableConfig {
            title: "Passengers".into(),
            columns: vec!["name".into(), "age".into(), "nonexistent".into()],
            max_rows: Some(3),
        };
        let Artifact::Table(table) = View::Table(config).render(&titanic_view()) else {
            panic!("expected a table");
        };
        assert_eq!(table.columns, vec!["name", "age"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.total_rows, 20);
        assert!(table.is_truncated());
        assert_eq!(table.rows[0], vec!["Braund, Mr. Owen Harris", "22"]);
    }

    #[test]
    fn table_without_column_list_shows_all() {
        let data = parse_csv(TIPS).unwrap().all_rows();
        let config = TableConfig {
            title: "Tips".into(),
            columns: Vec::new(),
            max_rows: None,
        };
        let Artifact::Table(table) = View::Table(config).render(&data) else {
            panic!("expected a table");
        };
        assert_eq!(table.columns.len(), 7);
        assert_eq!(table.rows.len(), 18);
        assert!(!table.is_truncated());
        assert_eq!(table.rows[0], vec!["16.99", "1.01", "Female", "No", "Sun", "Dinner", "2"]);
    }

    // ───────────────────── Chart tests ─────────────────────

    #[test]
    fn bar_chart_groups_by_day_in_sorted_order() {
        let views = DashboardConfig::tips().views;
        let data = parse_csv(TIPS).unwrap().all_rows();
        let Artifact::Bar(bar) = render(&views, RenderMode::Bar, &data) else {
            panic!("expected a bar chart");
        };
        assert_eq!(bar.bars.len(), 18);
        let names: Vec<&str> = bar.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Fri", "Sat", "Sun", "Thur"]);
        assert_eq!(bar.groups[0].color, PALETTE[0]);
        assert_eq!(bar.bars[0].x, 16.99);
        assert_eq!(bar.bars[0].y, 1.01);
        assert_eq!(bar.bars[0].group, "Sun");
    }

    #[test]
    fn scatter_skips_rows_without_coordinates() {
        let views = DashboardConfig::titanic().views;
        let Artifact::Scatter(scatter) = render(&views, RenderMode::Scatter, &titanic_view()) else {
            panic!("expected a scatter plot");
        };
        // Three passengers have no age
        assert_eq!(scatter.points.len(), 17);
        let names: Vec<&str> = scatter.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["0", "1"]);
        assert!(!scatter.x_ticks.is_empty());
    }

    #[test]
    fn scatter_over_text_columns_is_no_data() {
        let view = View::Scatter(ScatterConfig {
            title: "Nonsense".into(),
            x: "sex".into(),
            y: "name".into(),
            color: None,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
        });
        assert!(view.render(&titanic_view()).is_no_data());
    }

    #[test]
    fn histogram_counts_every_known_age() {
        let views = DashboardConfig::titanic().views;
        let Artifact::Histogram(hist) = render(&views, RenderMode::Histogram, &titanic_view()) else {
            panic!("expected a histogram");
        };
        let total: usize = hist.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 17);
        assert_eq!(hist.bins.first().map(|b| b.x0), Some(0.0));
        assert_eq!(hist.bins.last().map(|b| b.x1), Some(80.0));
    }

    #[test]
    fn histogram_derives_domain_when_unset() {
        let view = View::Histogram(HistogramConfig {
            title: "Fare".into(),
            column: "fare".into(),
            bin_width: 10.0,
            domain: None,
            x_ticks: Vec::new(),
        });
        let Artifact::Histogram(hist) = view.render(&titanic_view()) else {
            panic!("expected a histogram");
        };
        assert_eq!(hist.bins[0].x0, 0.0);
        assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 20);
    }

    #[test]
    fn box_plot_has_one_box_per_class() {
        let views = DashboardConfig::titanic().views;
        let Artifact::BoxPlot(plot) = render(&views, RenderMode::BoxPlot, &titanic_view()) else {
            panic!("expected a box plot");
        };
        let groups: Vec<&str> = plot.boxes.iter().map(|b| b.group.as_str()).collect();
        assert_eq!(groups, vec!["1", "2", "3"]);
        let counts: usize = plot.boxes.iter().map(|b| b.count).sum();
        assert_eq!(counts, 20);
        for b in &plot.boxes {
            assert!(b.lower_whisker <= b.q1 && b.q1 <= b.median);
            assert!(b.median <= b.q3 && b.q3 <= b.upper_whisker);
        }
    }

    #[test]
    fn artifacts_serialize_with_kind_tag() {
        let json = serde_json::to_value(Artifact::no_data()).unwrap();
        assert_eq!(json["kind"], "noData");
        assert_eq!(json["message"], NO_DATA_MESSAGE);

        let views = DashboardConfig::tips().views;
        let data = parse_csv(TIPS).unwrap().all_rows();
        let json = serde_json::to_value(render(&views, RenderMode::Bar, &data)).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["xLabel"], "total_bill");
        assert!(json["bars"].as_array().is_some_and(|b| b.len() == 18));
    }
}

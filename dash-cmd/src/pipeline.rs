//! `filter` and `render`: the dashboard pipeline without the browser.

use crate::args::PipelineArgs;
use anyhow::Context;
use dash_data::config::DashboardConfig;
use dash_data::filter::{build_filter, Selection};
use dash_data::loader::{self, LoadOutcome};
use dash_data::models::Artifact;
use dash_data::render::{render, RenderMode};
use dash_data::{Dataset, FilteredView};
use log::{info, warn};
use std::fs::File;
use std::io::{self, Write};

/// Load the dashboard's source. A failed load is reported and the run
/// continues on the empty fallback, just like the web apps.
pub async fn load(config: &DashboardConfig) -> LoadOutcome {
    let outcome = loader::load_source(&config.source).await;
    if let Some(diagnostic) = &outcome.diagnostic {
        warn!("{}", diagnostic);
    }
    for column in outcome
        .dataset
        .sentinel_conflicts(&config.all_token, &config.categorical_columns())
    {
        warn!(
            "Column '{}' contains a literal '{}'; it always selects every category",
            column, config.all_token
        );
    }
    outcome
}

pub fn filtered_view(dataset: &Dataset, selection: &Selection) -> FilteredView {
    let view = dataset.filter(&build_filter(dataset, selection));
    info!("{} of {} rows selected", view.len(), dataset.row_count());
    view
}

/// Write a filtered view as CSV: header row, then one record per row.
pub fn write_csv<W: Write>(view: &FilteredView, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(view.columns().iter().map(|c| c.name.as_str()))?;
    for row in view.rows() {
        wtr.write_record(row.cells.iter().map(|v| v.key()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pick the render mode: `--mode` if given, else the dashboard's default.
pub fn resolve_mode(config: &DashboardConfig, mode: Option<&str>) -> anyhow::Result<RenderMode> {
    match mode {
        Some(raw) => raw.parse::<RenderMode>().map_err(anyhow::Error::msg),
        None => Ok(config.default_mode),
    }
}

pub fn render_json(artifact: &Artifact) -> anyhow::Result<String> {
    serde_json::to_string_pretty(artifact).context("Failed to serialize artifact")
}

pub async fn run_filter(args: &PipelineArgs, output: Option<&str>) -> anyhow::Result<()> {
    let config = args.dashboard()?;
    let selection = args.selection(&config)?;
    info!("Filtering {} [{}]", config.source, args.selects.join(" "));

    let outcome = load(&config).await;
    let view = filtered_view(&outcome.dataset, &selection);

    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
            write_csv(&view, file)?;
            info!("Wrote {} rows to {}", view.len(), path);
        }
        None => write_csv(&view, io::stdout().lock())?,
    }
    Ok(())
}

pub async fn run_render(args: &PipelineArgs, mode: Option<&str>) -> anyhow::Result<()> {
    let config = args.dashboard()?;
    let selection = args.selection(&config)?;
    let mode = resolve_mode(&config, mode)?;

    let outcome = load(&config).await;
    let view = filtered_view(&outcome.dataset, &selection);
    let artifact = render(&config.views, mode, &view);
    if artifact.is_no_data() {
        info!("No data for mode '{}'", mode);
    }
    println!("{}", render_json(&artifact)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITANIC_SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures/titanic_sample.csv");

    fn args(selects: &[&str], range: Option<&str>) -> PipelineArgs {
        PipelineArgs {
            preset: "titanic".to_string(),
            config: None,
            source: Some(TITANIC_SAMPLE.to_string()),
            selects: selects.iter().map(|s| s.to_string()).collect(),
            range: range.map(String::from),
        }
    }

    fn run(a: &PipelineArgs) -> FilteredView {
        let config = a.dashboard().unwrap();
        let dataset = loader::load_path(&config.source).dataset;
        filtered_view(&dataset, &a.selection(&config).unwrap())
    }

    fn ids(view: &FilteredView) -> Vec<String> {
        view.values("passengerid").map(|v| v.key()).collect()
    }

    // ───────────────────── Filtering ─────────────────────

    #[test]
    fn first_class_adults_in_range() {
        let view = run(&args(&["pclass=1", "sex=All"], Some("20:50")));
        assert_eq!(ids(&view), vec!["2", "4"]);
    }

    #[test]
    fn defaults_keep_every_passenger_with_an_age() {
        // Rows 6, 18 and 20 have no age and fall outside the default range
        let view = run(&args(&[], None));
        assert_eq!(view.len(), 17);
    }

    #[test]
    fn empty_select_matches_nothing() {
        let view = run(&args(&["sex="], None));
        assert!(view.is_empty());
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let view = run(&args(&["pclass=1", "sex=male"], None));
        let mut out = Vec::new();
        write_csv(&view, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("passengerid,survived,pclass,name"));
        assert_eq!(
            lines.next().unwrap(),
            "7,0,1,\"McCarthy, Mr. Timothy J\",male,54,0,0,17463,51.8625,E46,S"
        );
        assert!(lines.next().is_none());
    }

    // ───────────────────── Rendering ─────────────────────

    #[test]
    fn mode_defaults_to_dashboard_default() {
        let config = DashboardConfig::titanic();
        assert_eq!(resolve_mode(&config, None).unwrap(), RenderMode::Scatter);
        assert_eq!(resolve_mode(&config, Some("box")).unwrap(), RenderMode::BoxPlot);
        assert!(resolve_mode(&config, Some("pie")).is_err());
    }

    #[test]
    fn no_rows_render_as_no_data() {
        let a = args(&["pclass=4"], None);
        let config = a.dashboard().unwrap();
        let view = run(&a);
        for mode in config.modes() {
            let json = render_json(&render(&config.views, mode, &view)).unwrap();
            assert!(json.contains("\"kind\": \"noData\""), "{mode}: {json}");
        }
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_empty() {
        let mut config = DashboardConfig::tips();
        config.source = "/nonexistent/tips.csv".to_string();
        let outcome = load(&config).await;
        assert!(outcome.is_fallback());
        assert!(outcome.dataset.is_empty());
    }
}

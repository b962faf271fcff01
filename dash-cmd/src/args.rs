//! Arguments shared by `filter` and `render`, and their parsing.

use anyhow::{bail, Context};
use clap::Args;
use dash_data::config::DashboardConfig;
use dash_data::filter::{CategorySelection, RangeSelection, Selection};

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Built-in dashboard: tips or titanic
    #[arg(short, long, default_value = "titanic")]
    pub preset: String,

    /// Dashboard config JSON (overrides --preset)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path or URL of the CSV (overrides the dashboard's source)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Category selection, e.g. `pclass=1,2` or `sex=All`. Repeatable.
    #[arg(long = "select", value_name = "COLUMN=KEYS")]
    pub selects: Vec<String>,

    /// Inclusive bounds for the dashboard's range column, e.g. `20:50`
    #[arg(short, long, value_name = "MIN:MAX")]
    pub range: Option<String>,
}

impl PipelineArgs {
    pub fn dashboard(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::load(path)
                .with_context(|| format!("Failed to read dashboard config {}", path))?,
            None => DashboardConfig::preset(&self.preset)
                .with_context(|| format!("Unknown preset '{}' (expected tips or titanic)", self.preset))?,
        };
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        Ok(config)
    }

    /// Selection from the dashboard defaults overridden by `--select`/`--range`.
    pub fn selection(&self, config: &DashboardConfig) -> anyhow::Result<Selection> {
        let mut keys = config.default_keys();
        let mut extra = Vec::new();
        for raw in &self.selects {
            let (column, picked) = parse_select(raw)?;
            if config.categories.iter().any(|c| c.column == column) {
                keys.insert(column, picked.into_iter().collect());
            } else {
                extra.push((column, picked));
            }
        }

        let range = match &self.range {
            Some(raw) => {
                let (min, max) = parse_range(raw)?;
                let Some(control) = &config.range else {
                    bail!("Dashboard '{}' has no range control", config.title);
                };
                Some(RangeSelection::new(control.column.clone(), min, max))
            }
            None => None,
        };

        let mut selection = config.selection(&keys, range.as_ref());
        for (column, picked) in extra {
            selection = selection
                .with_category(column, CategorySelection::from_keys(picked, &config.all_token));
        }
        Ok(selection)
    }
}

/// Split `column=key1,key2` into a normalized column name and its keys.
///
/// Keys are trimmed; an empty list (`sex=`) selects nothing.
pub fn parse_select(raw: &str) -> anyhow::Result<(String, Vec<String>)> {
    let Some((column, keys)) = raw.split_once('=') else {
        bail!("Invalid --select '{}': expected COLUMN=KEY[,KEY...]", raw);
    };
    let column = dash_data::value::normalize_column_name(column);
    if column.is_empty() {
        bail!("Invalid --select '{}': missing column name", raw);
    }
    let keys = keys
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();
    Ok((column, keys))
}

/// Parse `min:max`. Reversed bounds are accepted and swapped later.
pub fn parse_range(raw: &str) -> anyhow::Result<(f64, f64)> {
    let Some((lo, hi)) = raw.split_once(':') else {
        bail!("Invalid --range '{}': expected MIN:MAX", raw);
    };
    let lo: f64 = lo
        .trim()
        .parse()
        .with_context(|| format!("Invalid --range lower bound '{}'", lo))?;
    let hi: f64 = hi
        .trim()
        .parse()
        .with_context(|| format!("Invalid --range upper bound '{}'", hi))?;
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(selects: &[&str], range: Option<&str>) -> PipelineArgs {
        PipelineArgs {
            preset: "titanic".to_string(),
            config: None,
            source: None,
            selects: selects.iter().map(|s| s.to_string()).collect(),
            range: range.map(String::from),
        }
    }

    // ───────────────────── Parsing ─────────────────────

    #[test]
    fn select_splits_column_and_keys() {
        let (column, keys) = parse_select(" PClass = 1, 2 ").unwrap();
        assert_eq!(column, "pclass");
        assert_eq!(keys, vec!["1", "2"]);
    }

    #[test]
    fn select_with_no_keys_is_empty() {
        let (_, keys) = parse_select("sex=").unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn select_requires_equals_and_column() {
        assert!(parse_select("pclass").is_err());
        assert!(parse_select("=1").is_err());
    }

    #[test]
    fn range_parses_bounds() {
        assert_eq!(parse_range("20:50").unwrap(), (20.0, 50.0));
        assert_eq!(parse_range(" 0.5 : 80 ").unwrap(), (0.5, 80.0));
        assert!(parse_range("20-50").is_err());
        assert!(parse_range("x:50").is_err());
    }

    // ───────────────────── Selections ─────────────────────

    #[test]
    fn unknown_preset_is_an_error() {
        let mut a = args(&[], None);
        a.preset = "iris".to_string();
        assert!(a.dashboard().is_err());
    }

    #[test]
    fn source_override_replaces_preset_source() {
        let mut a = args(&[], None);
        a.source = Some("fixtures/titanic_sample.csv".to_string());
        assert_eq!(a.dashboard().unwrap().source, "fixtures/titanic_sample.csv");
    }

    #[test]
    fn selects_and_range_override_defaults() {
        let a = args(&["pclass=1", "sex=All"], Some("50:20"));
        let config = a.dashboard().unwrap();
        let selection = a.selection(&config).unwrap();

        assert_eq!(
            selection.categories,
            vec![
                ("pclass".to_string(), CategorySelection::Only(["1".to_string()].into())),
                ("sex".to_string(), CategorySelection::All),
            ]
        );
        assert_eq!(selection.range, Some(RangeSelection::new("age", 20.0, 50.0)));
    }

    #[test]
    fn select_on_other_column_adds_a_predicate() {
        let a = args(&["embarked=S"], None);
        let config = a.dashboard().unwrap();
        let selection = a.selection(&config).unwrap();
        assert_eq!(selection.categories.len(), 3);
        assert_eq!(
            selection.categories[2],
            ("embarked".to_string(), CategorySelection::Only(["S".to_string()].into()))
        );
    }

    #[test]
    fn range_needs_a_range_control() {
        let mut a = args(&[], Some("1:2"));
        a.preset = "tips".to_string();
        let config = a.dashboard().unwrap();
        assert!(a.selection(&config).is_err());
    }
}

//! `inspect`: a quick look at a CSV before building a dashboard on it.

use dash_data::loader;
use dash_data::value::ColumnKind;
use dash_data::Dataset;
use std::fmt::Write;

/// Categories listed per text column before the list is cut short.
const MAX_LISTED_CATEGORIES: usize = 12;

pub async fn run_inspect(source: &str, all_token: &str) -> anyhow::Result<()> {
    let outcome = loader::load_source(source).await;
    if let Some(diagnostic) = &outcome.diagnostic {
        anyhow::bail!("{}", diagnostic);
    }
    print!("{}", summarize(source, &outcome.dataset, all_token));
    Ok(())
}

/// Human-readable report of columns, kinds, categories and token conflicts.
pub fn summarize(source: &str, dataset: &Dataset, all_token: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {} rows, {} columns", source, dataset.row_count(), dataset.columns().len());

    let mut text_columns = Vec::new();
    for column in dataset.columns() {
        match column.kind {
            ColumnKind::Numeric => {
                let bounds = dataset
                    .numeric_bounds(&column.name)
                    .map(|(lo, hi)| format!("{} .. {}", lo, hi))
                    .unwrap_or_else(|| "no values".to_string());
                let _ = writeln!(out, "  {:<14} numeric  {}", column.name, bounds);
            }
            ColumnKind::Text => {
                let keys = dataset.category_keys(&column.name);
                let listed = if keys.len() > MAX_LISTED_CATEGORIES {
                    format!("{} distinct", keys.len())
                } else {
                    keys.join(", ")
                };
                let _ = writeln!(out, "  {:<14} text     {}", column.name, listed);
                text_columns.push(column.name.as_str());
            }
        }
    }

    for column in dataset.sentinel_conflicts(all_token, &text_columns) {
        let _ = writeln!(
            out,
            "warning: column '{}' contains the literal value '{}'",
            column, all_token
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_kinds_and_categories() {
        let csv = include_str!("../../fixtures/tips_sample.csv");
        let dataset = loader::parse_csv(csv).unwrap();
        let report = summarize("tips_sample.csv", &dataset, "All");

        assert!(report.starts_with("tips_sample.csv: 18 rows, 7 columns"));
        assert!(report.contains("total_bill"));
        assert!(report.contains("numeric"));
        assert!(report.lines().any(|l| l.contains("time") && l.contains("Dinner, Lunch")));
        assert!(!report.contains("warning"));
    }

    #[test]
    fn summary_warns_about_literal_token() {
        let dataset = loader::parse_csv("group,n\nAll,1\nsome,2\n").unwrap();
        let report = summarize("inline", &dataset, "All");
        assert!(report.contains("warning: column 'group' contains the literal value 'All'"));
    }
}

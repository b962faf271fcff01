//! Selections read from the controls and the predicates built from them.
//!
//! A [`Selection`] is what the UI owns: which category keys are ticked per
//! column and the numeric range. [`build_filter`] turns it into a [`Filter`]
//! against a concrete dataset, expanding the "All" token into the column's
//! full domain. The filter is then executed by [`crate::Dataset::filter`].

use crate::value::{ColumnKind, Value};
use crate::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default reserved selection value meaning "every category".
pub const ALL_TOKEN: &str = "All";

/// What a categorical control currently selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// Match every value present in the column.
    All,
    /// Match only these category keys. An empty set matches nothing.
    Only(BTreeSet<String>),
}

impl CategorySelection {
    /// Interpret the raw keys of a control.
    ///
    /// If any key equals `all_token` the whole selection becomes [`All`](Self::All);
    /// the token is a mode flag and never a value to look for in the data.
    pub fn from_keys<I, S>(keys: I, all_token: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        if keys.contains(all_token) {
            CategorySelection::All
        } else {
            CategorySelection::Only(keys)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategorySelection::All)
    }
}

/// An inclusive numeric range over one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSelection {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

impl RangeSelection {
    /// Bounds given in the wrong order are swapped.
    pub fn new(column: impl Into<String>, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            column: column.into(),
            min,
            max,
        }
    }

    /// Move the lower bound, dragging the upper bound along if it is passed.
    pub fn with_min(&self, min: f64) -> Self {
        Self {
            column: self.column.clone(),
            min,
            max: self.max.max(min),
        }
    }

    /// Move the upper bound, dragging the lower bound along if it is passed.
    pub fn with_max(&self, max: f64) -> Self {
        Self {
            column: self.column.clone(),
            min: self.min.min(max),
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The full control snapshot one recomputation reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub categories: Vec<(String, CategorySelection)>,
    pub range: Option<RangeSelection>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, column: impl Into<String>, selection: CategorySelection) -> Self {
        self.categories.push((column.into(), selection));
        self
    }

    pub fn with_range(mut self, range: RangeSelection) -> Self {
        self.range = Some(range);
        self
    }
}

/// One row test. A predicate on a column the dataset lacks matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Any cell of the column, missing ones included: the full domain.
    Any { column: String },
    /// Cell equals one of `values`, or is missing when `include_missing`.
    OneOf {
        column: String,
        values: Vec<Value>,
        include_missing: bool,
    },
    /// Cell is a number in `[min, max]`.
    Between { column: String, min: f64, max: f64 },
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Predicate::Any { column }
            | Predicate::OneOf { column, .. }
            | Predicate::Between { column, .. } => column,
        }
    }

    /// Evaluate against a single cell of [`column`](Self::column).
    pub fn matches(&self, cell: &Value) -> bool {
        match self {
            Predicate::Any { .. } => true,
            Predicate::OneOf {
                values,
                include_missing,
                ..
            } => match cell {
                Value::Missing => *include_missing,
                other => values.contains(other),
            },
            Predicate::Between { min, max, .. } => {
                matches!(cell, Value::Number(n) if *n >= *min && *n <= *max)
            }
        }
    }
}

/// A conjunction of predicates. No predicates means every row passes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    pub predicates: Vec<Predicate>,
}

impl Filter {
    /// Whether a view row passes every predicate, given the view's columns.
    pub fn accepts(&self, view: &crate::FilteredView, row: &crate::Row) -> bool {
        self.predicates.iter().all(|p| {
            view.column_index(p.column())
                .and_then(|i| row.cells.get(i))
                .is_some_and(|cell| p.matches(cell))
        })
    }
}

/// Build the predicate conjunction for `selection` against `dataset`.
pub fn build_filter(dataset: &Dataset, selection: &Selection) -> Filter {
    let mut predicates = Vec::with_capacity(selection.categories.len() + 1);

    for (column, choice) in &selection.categories {
        let predicate = match choice {
            CategorySelection::All => Predicate::Any {
                column: column.clone(),
            },
            CategorySelection::Only(keys) => {
                let kind = dataset.column(column).map(|c| c.kind);
                Predicate::OneOf {
                    column: column.clone(),
                    values: keys
                        .iter()
                        .filter(|k| !k.is_empty())
                        .filter_map(|k| typed_key(k, kind))
                        .collect(),
                    include_missing: keys.contains(""),
                }
            }
        };
        predicates.push(predicate);
    }

    if let Some(range) = &selection.range {
        predicates.push(Predicate::Between {
            column: range.column.clone(),
            min: range.min,
            max: range.max,
        });
    }

    Filter { predicates }
}

/// Convert a control key into the value type stored in the column.
fn typed_key(key: &str, kind: Option<ColumnKind>) -> Option<Value> {
    match kind {
        Some(ColumnKind::Numeric) => key.trim().parse::<f64>().ok().map(Value::Number),
        Some(ColumnKind::Text) => Some(Value::Text(key.to_string())),
        None => None,
    }
}

//! Cell values and column metadata.

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a loaded dataset.
///
/// Cells are coerced once at load time: a column whose every non-empty cell
/// parses as `f64` holds `Number`s, any other column holds `Text`. Empty cells
/// are `Missing` in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Missing,
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The string a categorical control uses to name this value.
    ///
    /// Integral numbers drop their fractional part so `1.0` and `"1"` agree.
    pub fn key(&self) -> String {
        match self {
            Value::Missing => String::new(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }

    pub(crate) fn from_sql(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Missing,
            ValueRef::Integer(i) => Value::Number(i as f64),
            ValueRef::Real(r) => Value::Number(r),
            ValueRef::Text(t) | ValueRef::Blob(t) => {
                Value::Text(String::from_utf8_lossy(t).into_owned())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Format a number the way table cells and category keys show it.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Inferred storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl ColumnKind {
    pub(crate) fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "REAL",
            ColumnKind::Text => "TEXT",
        }
    }
}

/// A named, typed column. Names are already normalized (trimmed, lower-case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Normalize a raw header so predicates can reference columns reliably.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

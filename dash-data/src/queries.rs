//! Read-only queries against a loaded dataset.
//!
//! Filtering runs as one `SELECT ... WHERE` over the in-memory table, with
//! every predicate rendered as a parameterised clause. "Any value" adds no
//! clause at all. Predicates that can never match (unknown column, range
//! over a text column, empty set) become a literal `0` instead of an error.

use crate::filter::{Filter, Predicate};
use crate::schema::{self, TABLE};
use crate::value::{ColumnKind, Value};
use crate::view::{FilteredView, Row};
use crate::Dataset;
use rusqlite::types::Value as SqlValue;

impl Dataset {
    // ───────────────────── Row Queries ─────────────────────

    /// Every row, in load order.
    pub fn all_rows(&self) -> FilteredView {
        self.filter(&Filter::default())
    }

    /// Rows passing every predicate of `filter`, in load order.
    ///
    /// A failing query is logged and treated as "no rows"; callers never see
    /// an error from here.
    pub fn filter(&self, filter: &Filter) -> FilteredView {
        match self.query_rows(filter) {
            Ok(rows) => {
                log::debug!(
                    "[Dash Debug] query: filter kept {} of {} rows",
                    rows.len(),
                    self.row_count
                );
                FilteredView::new(self.columns.clone(), rows)
            }
            Err(e) => {
                log::warn!("[Dash] query: filter failed, returning no rows: {}", e);
                FilteredView::new(self.columns.clone(), Vec::new())
            }
        }
    }

    fn query_rows(&self, filter: &Filter) -> crate::error::Result<Vec<Row>> {
        let Some(conn) = &self.conn else {
            return Ok(Vec::new());
        };

        let (clause, params) = self.where_clause(filter);
        let sql = format!(
            "SELECT {} FROM {TABLE} WHERE {clause} ORDER BY rowid",
            schema::select_list(&self.columns)
        );
        let width = self.columns.len();

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), |row| {
                let id: i64 = row.get(0)?;
                let mut cells = Vec::with_capacity(width);
                for i in 0..width {
                    cells.push(Value::from_sql(row.get_ref(i + 1)?));
                }
                Ok(Row { id, cells })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn where_clause(&self, filter: &Filter) -> (String, Vec<SqlValue>) {
        let mut clauses = Vec::new();
        let mut params = Vec::new();

        for predicate in &filter.predicates {
            let Some((column, ident)) = self.column_sql(predicate.column()) else {
                clauses.push("0".to_string());
                continue;
            };

            match predicate {
                Predicate::Any { .. } => {}
                Predicate::OneOf {
                    values,
                    include_missing,
                    ..
                } => {
                    let mut alternatives = Vec::new();
                    let typed: Vec<SqlValue> = values.iter().filter_map(to_sql).collect();
                    if !typed.is_empty() {
                        let start = params.len() + 1;
                        let placeholders = (start..start + typed.len())
                            .map(|i| format!("?{i}"))
                            .collect::<Vec<_>>()
                            .join(", ");
                        alternatives.push(format!("{ident} IN ({placeholders})"));
                        params.extend(typed);
                    }
                    if *include_missing {
                        alternatives.push(format!("{ident} IS NULL"));
                    }
                    if alternatives.is_empty() {
                        clauses.push("0".to_string());
                    } else {
                        clauses.push(format!("({})", alternatives.join(" OR ")));
                    }
                }
                Predicate::Between { min, max, .. } => {
                    if column.kind != ColumnKind::Numeric {
                        clauses.push("0".to_string());
                        continue;
                    }
                    let lo = params.len() + 1;
                    clauses.push(format!("{ident} BETWEEN ?{} AND ?{}", lo, lo + 1));
                    params.push(SqlValue::Real(*min));
                    params.push(SqlValue::Real(*max));
                }
            }
        }

        if clauses.is_empty() {
            ("1".to_string(), params)
        } else {
            (clauses.join(" AND "), params)
        }
    }

    // ───────────────────── Column Queries ─────────────────────

    /// Distinct values of `column`, missing first, then in SQLite order.
    ///
    /// Unknown columns and empty datasets have an empty domain.
    pub fn distinct(&self, column: &str) -> Vec<Value> {
        let (Some(conn), Some((_, ident))) = (&self.conn, self.column_sql(column)) else {
            return Vec::new();
        };
        let sql = format!("SELECT DISTINCT {ident} FROM {TABLE} ORDER BY {ident}");

        let result = conn.prepare(&sql).and_then(|mut stmt| {
            let values = stmt
                .query_map([], |row| Ok(Value::from_sql(row.get_ref(0)?)))?
                .collect::<Result<Vec<_>, _>>();
            values
        });
        match result {
            Ok(values) => values,
            Err(e) => {
                log::warn!("[Dash] query: distinct({}) failed: {}", column, e);
                Vec::new()
            }
        }
    }

    /// Distinct category keys of `column`, skipping missing cells.
    pub fn category_keys(&self, column: &str) -> Vec<String> {
        self.distinct(column)
            .iter()
            .filter(|v| !v.is_missing())
            .map(Value::key)
            .collect()
    }

    /// Smallest and largest number in a numeric column.
    pub fn numeric_bounds(&self, column: &str) -> Option<(f64, f64)> {
        let conn = self.conn.as_ref()?;
        let (col, ident) = self.column_sql(column)?;
        if col.kind != ColumnKind::Numeric {
            return None;
        }
        let sql = format!("SELECT MIN({ident}), MAX({ident}) FROM {TABLE}");
        conn.query_row(&sql, [], |row| {
            Ok((row.get::<_, Option<f64>>(0)?, row.get::<_, Option<f64>>(1)?))
        })
        .ok()
        .and_then(|(lo, hi)| Some((lo?, hi?)))
    }

    /// Categorical columns whose data contains the literal `token`.
    ///
    /// Such a value can never be selected on its own, since the token always
    /// means "every category"; the caller should pick another token.
    pub fn sentinel_conflicts(&self, token: &str, columns: &[&str]) -> Vec<String> {
        columns
            .iter()
            .filter(|c| self.category_keys(c).iter().any(|k| k == token))
            .map(|c| c.to_string())
            .collect()
    }
}

fn to_sql(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Missing => None,
        Value::Number(n) => Some(SqlValue::Real(*n)),
        Value::Text(s) => Some(SqlValue::Text(s.clone())),
    }
}

//! The derived table a filter produces.

use crate::value::{Column, Value};
use std::rc::Rc;

static MISSING: Value = Value::Missing;

/// One dataset row, tagged with its position in the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// SQLite rowid, 1-based, in load order.
    pub id: i64,
    pub cells: Vec<Value>,
}

/// The rows of a [`crate::Dataset`] that passed the current filter.
///
/// A view has no identity of its own; it is rebuilt whenever the selection
/// changes and compared by content so reactive memos can skip no-op updates.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    columns: Rc<[Column]>,
    rows: Vec<Row>,
}

impl FilteredView {
    pub(crate) fn new(columns: Rc<[Column]>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// The cell in `column` for every row, `Missing` if the column is absent.
    pub fn values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let idx = self.column_index(column);
        self.rows.iter().map(move |row| {
            idx.and_then(|i| row.cells.get(i)).unwrap_or(&MISSING)
        })
    }

    /// Numeric cells of `column`, skipping missing and text cells.
    pub fn numbers<'a>(&'a self, column: &str) -> impl Iterator<Item = f64> + 'a {
        self.values(column).filter_map(Value::as_f64)
    }
}

impl Default for FilteredView {
    fn default() -> Self {
        Self::new(Rc::from(Vec::new()), Vec::new())
    }
}

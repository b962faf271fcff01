//! Dataset loading, filtering and chart artifacts for the dashboard apps.
//!
//! This crate holds everything the dashboards do that is not UI wiring:
//! a CSV is loaded once into an in-memory SQLite table, a [`filter::Selection`]
//! read from the controls becomes a conjunction of predicates, and the
//! resulting [`FilteredView`] is handed to a [`render::View`] that produces a
//! serializable [`models::Artifact`] for D3.js or the table component.
//!
//! # Architecture
//!
//! - In-memory SQLite via `rusqlite` (compiles to WASM via `wasm32-unknown-unknown`)
//! - `Rc<Connection>` shared between Dioxus components in single-threaded WASM
//! - The table is written once by [`loader`] and only read afterwards
//! - Every artifact derives `Serialize` so it can cross the JS bridge as JSON
//!
//! # Usage
//!
//! ```rust
//! use dash_data::filter::{build_filter, CategorySelection, RangeSelection, Selection};
//! use dash_data::loader::parse_csv;
//!
//! let dataset = parse_csv("Pclass,Sex,Age\n1,male,30\n2,female,45\n").unwrap();
//! let selection = Selection::new()
//!     .with_category("pclass", CategorySelection::from_keys(["1"], "All"))
//!     .with_category("sex", CategorySelection::from_keys(["All"], "All"))
//!     .with_range(RangeSelection::new("age", 20.0, 50.0));
//!
//! let view = dataset.filter(&build_filter(&dataset, &selection));
//! assert_eq!(view.len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod render;
mod queries;
mod schema;
pub mod stats;
pub mod value;
mod view;

pub use view::{FilteredView, Row};

use rusqlite::Connection;
use std::fmt;
use std::rc::Rc;
use value::{Column, Value};

/// An immutable table of named columns, loaded once.
///
/// This struct is cheaply cloneable (via `Rc`) and suitable for sharing
/// across Dioxus components in a single-threaded WASM environment. An empty
/// dataset (no columns, no rows) carries no connection at all; it is what
/// the loader substitutes when a source cannot be read.
#[derive(Clone)]
pub struct Dataset {
    conn: Option<Rc<Connection>>,
    columns: Rc<[Column]>,
    row_count: usize,
}

impl Dataset {
    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            conn: None,
            columns: Rc::from(Vec::new()),
            row_count: 0,
        }
    }

    /// Build a dataset from already-coerced rows.
    ///
    /// Rows shorter than `columns` are padded with [`Value::Missing`];
    /// longer rows are truncated.
    pub(crate) fn from_rows(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> error::Result<Self> {
        if columns.is_empty() {
            return Err(error::DataError::MissingHeader);
        }
        let mut conn = Connection::open_in_memory()?;
        conn.execute_batch(&schema::create_table(&columns))?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&schema::insert_statement(&columns))?;
            for row in &rows {
                let params = (0..columns.len()).map(|i| match row.get(i) {
                    Some(Value::Number(n)) => rusqlite::types::Value::Real(*n),
                    Some(Value::Text(s)) => rusqlite::types::Value::Text(s.clone()),
                    Some(Value::Missing) | None => rusqlite::types::Value::Null,
                });
                stmt.execute(rusqlite::params_from_iter(params))?;
            }
        }
        tx.commit()?;

        Ok(Self {
            conn: Some(Rc::new(conn)),
            columns: Rc::from(columns),
            row_count: rows.len(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The column named `name` and its SQL identifier.
    pub(crate) fn column_sql(&self, name: &str) -> Option<(&Column, String)> {
        let position = self.columns.iter().position(|c| c.name == name)?;
        Some((&self.columns[position], schema::column_ident(position)))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// True when both handles share the same loaded table.
    pub fn same_table(&self, other: &Dataset) -> bool {
        match (&self.conn, &other.conn) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("columns", &self.columns)
            .field("row_count", &self.row_count)
            .finish()
    }
}

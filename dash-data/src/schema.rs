//! SQL generated for a loaded dataset.
//!
//! Column names come from arbitrary CSV headers and can shadow SQLite's own
//! names (`rowid`, `oid`, `_rowid_`), so the table never uses them. Each
//! column is stored under its position (`c0`, `c1`, ...) and the headers live
//! only in the dataset's [`Column`] list. The implicit `rowid` is the source
//! row id carried by every [`crate::Row`].

use crate::value::Column;

/// Name of the single table each dataset lives in.
pub(crate) const TABLE: &str = "dataset";

/// SQL name of the column at `position`.
pub(crate) fn column_ident(position: usize) -> String {
    format!("c{position}")
}

/// `CREATE TABLE` for the given columns.
pub(crate) fn create_table(columns: &[Column]) -> String {
    let defs = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {}", column_ident(i), c.kind.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {TABLE} ({defs});")
}

/// Parameterised `INSERT` matching [`create_table`].
pub(crate) fn insert_statement(columns: &[Column]) -> String {
    let names = (0..columns.len())
        .map(column_ident)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {TABLE} ({names}) VALUES ({placeholders})")
}

/// Column list for a `SELECT`, prefixed with the row id.
pub(crate) fn select_list(columns: &[Column]) -> String {
    std::iter::once("rowid".to_string())
        .chain((0..columns.len()).map(column_ident))
        .collect::<Vec<_>>()
        .join(", ")
}

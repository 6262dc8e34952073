use crate::model::cell::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One record of a table: column name to value, in the store's column order.
///
/// The order matters: the grid derives its columns from the first row's keys and
/// the CSV exporter uses the same keys, in the same order, as its header.
pub type Row = IndexMap<String, CellValue>;

pub const ID_COLUMN: &str = "id";
pub const CREATED_AT_COLUMN: &str = "created_at";
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Columns managed by the store. They are never edited in the grid and never
/// supplied by an import.
pub const IMMUTABLE_COLUMNS: [&str; 3] = [ID_COLUMN, CREATED_AT_COLUMN, UPDATED_AT_COLUMN];

pub fn is_editable(column: &str) -> bool {
    !IMMUTABLE_COLUMNS.contains(&column)
}

/// Identity of a row, taken from its `id` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        RowId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the id of `row`. String ids are used as is and numeric ids in their
    /// decimal form; any other `id` value (or none) yields `None`.
    pub fn of(row: &Row) -> Option<RowId> {
        match row.get(ID_COLUMN)? {
            CellValue::String(s) => Some(RowId(s.clone())),
            CellValue::Number(n) => Some(RowId(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        RowId(id)
    }
}

//! The row store capability.
//!
//! The grid, importer and exporter never talk to a database directly. They are
//! written against [`RowStore`], which the backend implements over SQLite and the
//! front end implements over the backend's HTTP API. The trait is `?Send` so that
//! the same code runs on the single-threaded browser executor and inside actix
//! handlers.

use crate::model::{Row, RowId};
use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
pub(crate) mod memory;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("invalid value for column '{column}': {message}")]
    InvalidValue { column: String, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// True when the request itself was wrong (bad table, column or value) rather
    /// than the store failing to serve it.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::UnknownTable(_)
                | StoreError::InvalidIdentifier(_)
                | StoreError::UnknownColumn { .. }
                | StoreError::InvalidValue { .. }
        )
    }
}

#[async_trait(?Send)]
pub trait RowStore {
    /// Rows of `table` in the store's default order, at most `limit` of them.
    async fn fetch_rows(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>, StoreError>;

    /// Writes `changes` (a partial row) to the row whose `id` equals `id`.
    async fn update_row(&self, table: &str, id: &RowId, changes: &Row) -> Result<(), StoreError>;

    /// Deletes every row whose `id` is in `ids` with a single request.
    async fn delete_rows(&self, table: &str, ids: &[RowId]) -> Result<(), StoreError>;

    /// Inserts all of `rows` with a single request.
    async fn insert_rows(&self, table: &str, rows: &[Row]) -> Result<(), StoreError>;

    async fn count_rows(&self, table: &str) -> Result<u64, StoreError>;
}

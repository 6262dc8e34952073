//! Store round trips of the bulk-edit grid.
//!
//! These take owned or borrowed inputs rather than the grid itself so a UI can
//! snapshot what it needs, run the request in the background and feed the result
//! back to [`GridState`](super::GridState).

use super::state::PendingEdits;
use crate::model::{Row, RowId};
use crate::store::{RowStore, StoreError};
use log::{debug, info};
use thiserror::Error;

/// Most rows a grid loads at once.
pub const GRID_ROW_LIMIT: usize = 100;

/// A save that stopped part way. Rows before `row_id` are already written.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("saving row {row_id} failed after {saved} of {total} rows: {source}")]
pub struct SaveError {
    pub row_id: RowId,
    pub saved: usize,
    pub total: usize,
    #[source]
    pub source: StoreError,
}

/// Loads the first [`GRID_ROW_LIMIT`] rows of `table`.
pub async fn fetch_grid_rows<S>(store: &S, table: &str) -> Result<Vec<Row>, StoreError>
where
    S: RowStore + ?Sized,
{
    let rows = store.fetch_rows(table, Some(GRID_ROW_LIMIT)).await?;
    debug!("loaded {} rows from {table}", rows.len());
    Ok(rows)
}

/// Writes every pending row edit, one update per row, in the order the rows
/// were first edited. Stops at the first failure.
pub async fn save_pending<S>(store: &S, table: &str, pending: &PendingEdits) -> Result<usize, SaveError>
where
    S: RowStore + ?Sized,
{
    let total = pending.len();
    for (saved, (row_id, changes)) in pending.iter().enumerate() {
        if let Err(source) = store.update_row(table, row_id, changes).await {
            return Err(SaveError {
                row_id: row_id.clone(),
                saved,
                total,
                source,
            });
        }
    }
    info!("saved {total} edited rows in {table}");
    Ok(total)
}

/// Deletes `ids` from `table` with one request. Nothing to delete sends nothing.
pub async fn delete_rows_by_id<S>(store: &S, table: &str, ids: &[RowId]) -> Result<usize, StoreError>
where
    S: RowStore + ?Sized,
{
    if ids.is_empty() {
        return Ok(0);
    }
    store.delete_rows(table, ids).await?;
    info!("deleted {} rows from {table}", ids.len());
    Ok(ids.len())
}

//! Bulk-edit grid: load up to [`GRID_ROW_LIMIT`] rows of a table, collect cell
//! edits and row selections locally, then save or delete them in bulk.
//!
//! [`GridState`] is the synchronous part a UI renders from. The free functions
//! in [`actions`] are the store round trips. [`GridEditor`] ties both to one
//! store for callers that can hold it across an await.
//!
//! A UI that cannot keep `&mut` state across an await (the yew grid) drives the
//! same steps itself: `GridState::begin_load`, then `fetch_grid_rows` and
//! `replace_rows`; `save_pending` then a reload; `delete_rows_by_id` on
//! `selected_ids` then a reload. [`GridEditor`] is that sequence in one place,
//! and its tests pin the request pattern both callers produce.

mod actions;
mod display;
mod state;

pub use actions::{delete_rows_by_id, fetch_grid_rows, save_pending, SaveError, GRID_ROW_LIMIT};
pub use display::{display_value, CellEditor};
pub use state::{GridState, PendingEdits, SelectionSet};

use crate::model::{CellValue, RowId};
use crate::store::{RowStore, StoreError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("reloading the table failed: {0}")]
    Reload(#[from] StoreError),
}

/// The load, edit, save and delete flow of the grid over one owned store.
pub struct GridEditor<S> {
    store: S,
    state: GridState,
}

impl<S: RowStore> GridEditor<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: GridState::new(),
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the grid with the first rows of `table`. On failure the grid is
    /// left empty.
    pub async fn load_table(&mut self, table: &str) -> Result<usize, StoreError> {
        self.state.begin_load(table);
        let rows = fetch_grid_rows(&self.store, table).await?;
        let count = rows.len();
        self.state.replace_rows(rows);
        Ok(count)
    }

    pub fn set_cell_value(&mut self, row_id: RowId, column: &str, value: CellValue) {
        self.state.set_cell_value(row_id, column, value);
    }

    pub fn set_cell_text(&mut self, row_id: RowId, column: &str, text: String) {
        self.state.set_cell_text(row_id, column, text);
    }

    pub fn toggle_row_selection(&mut self, row_id: RowId, selected: bool) {
        self.state.toggle_row_selection(row_id, selected);
    }

    pub fn toggle_select_all(&mut self, selected: bool) {
        self.state.toggle_select_all(selected);
    }

    /// Writes all pending edits and reloads the table.
    ///
    /// Nothing pending sends nothing. A failed row keeps every edit pending,
    /// including those of rows already written, so the user can retry.
    pub async fn save_changes(&mut self) -> Result<usize, GridError> {
        let Some(table) = self.state.table().map(str::to_string) else {
            return Ok(0);
        };
        if !self.state.has_pending() {
            return Ok(0);
        }
        let saved = save_pending(&self.store, &table, self.state.pending()).await?;
        self.state.clear_pending();
        self.load_table(&table).await?;
        Ok(saved)
    }

    /// Deletes the checked rows after `confirm` agrees, then reloads the table.
    ///
    /// `confirm` receives the number of rows about to be deleted. It is not asked
    /// when nothing is checked. Declining leaves the store and the selection
    /// untouched.
    pub async fn delete_selected<F>(&mut self, confirm: F) -> Result<usize, StoreError>
    where
        F: FnOnce(usize) -> bool,
    {
        let Some(table) = self.state.table().map(str::to_string) else {
            return Ok(0);
        };
        let ids = self.state.selected_ids();
        if ids.is_empty() || !confirm(ids.len()) {
            return Ok(0);
        }
        let deleted = delete_rows_by_id(&self.store, &table, &ids).await?;
        self.load_table(&table).await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use crate::store::memory::{row, MemoryStore, StoreCall};

    fn teams() -> Vec<Row> {
        vec![
            row([
                ("id", CellValue::from("t1")),
                ("name", CellValue::from("Rockets")),
                ("size", CellValue::from(4)),
            ]),
            row([
                ("id", CellValue::from("t2")),
                ("name", CellValue::from("Owls")),
                ("size", CellValue::from(3)),
            ]),
        ]
    }

    async fn editor() -> GridEditor<MemoryStore> {
        let mut editor = GridEditor::new(MemoryStore::default().with_table("teams", teams()));
        editor.load_table("teams").await.unwrap();
        editor.store().clear_calls();
        editor
    }

    #[tokio::test]
    async fn load_fills_rows_and_columns() {
        let editor = editor().await;
        assert_eq!(editor.state().rows().len(), 2);
        assert_eq!(editor.state().columns(), ["id", "name", "size"]);
    }

    #[tokio::test]
    async fn failed_load_leaves_grid_empty() {
        let mut editor = editor().await;
        editor.store().fail_fetches();
        assert!(editor.load_table("teams").await.is_err());
        assert!(editor.state().rows().is_empty());
        assert!(editor.state().columns().is_empty());
    }

    #[tokio::test]
    async fn save_sends_one_update_per_row_then_reloads() {
        let mut editor = editor().await;
        editor.set_cell_text("t2".into(), "size", "5".into());
        editor.set_cell_text("t1".into(), "name", "Comets".into());
        editor.set_cell_text("t2".into(), "name", "Hawks".into());

        assert_eq!(editor.save_changes().await.unwrap(), 2);

        let calls = editor.store().calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            StoreCall::Update {
                table: "teams".into(),
                id: "t2".into(),
                changes: row([("size", CellValue::from(5)), ("name", CellValue::from("Hawks"))]),
            }
        );
        assert_eq!(
            calls[1],
            StoreCall::Update {
                table: "teams".into(),
                id: "t1".into(),
                changes: row([("name", CellValue::from("Comets"))]),
            }
        );
        assert!(matches!(calls[2], StoreCall::Fetch { .. }));

        assert!(!editor.state().has_pending());
        assert_eq!(editor.state().rows()[1]["name"], CellValue::from("Hawks"));
    }

    #[tokio::test]
    async fn nothing_pending_saves_nothing() {
        let mut editor = editor().await;
        assert_eq!(editor.save_changes().await.unwrap(), 0);
        assert!(editor.store().calls().is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_edits() {
        let mut editor = editor().await;
        editor.store().fail_update_of("t1");
        editor.set_cell_value("t1".into(), "name", "Comets".into());

        let err = editor.save_changes().await.unwrap_err();
        assert!(matches!(err, GridError::Save(SaveError { saved: 0, .. })));
        assert!(editor.state().has_pending());
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut editor = editor().await;
        editor.toggle_select_all(true);

        let deleted = editor.delete_selected(|n| {
            assert_eq!(n, 2);
            false
        });
        assert_eq!(deleted.await.unwrap(), 0);
        assert!(editor.store().calls().is_empty());
        assert!(editor.state().all_selected());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_reloads() {
        let mut editor = editor().await;
        editor.toggle_row_selection("t1".into(), true);

        assert_eq!(editor.delete_selected(|_| true).await.unwrap(), 1);
        assert_eq!(
            editor.store().calls()[0],
            StoreCall::Delete {
                table: "teams".into(),
                ids: vec!["t1".into()],
            }
        );
        assert_eq!(editor.state().rows().len(), 1);
        assert!(editor.state().selection().is_empty());
    }

    #[tokio::test]
    async fn deletes_exactly_the_checked_rows_in_one_request() {
        let rows = (1..=5)
            .map(|i| row([("id", CellValue::from(format!("t{i}"))), ("name", CellValue::from(format!("team {i}")))]))
            .collect();
        let mut editor = GridEditor::new(MemoryStore::default().with_table("teams", rows));
        editor.load_table("teams").await.unwrap();
        editor.store().clear_calls();

        editor.toggle_row_selection("t4".into(), true);
        editor.toggle_row_selection("t2".into(), true);
        editor.toggle_row_selection("t3".into(), true);
        editor.toggle_row_selection("t3".into(), false);

        assert_eq!(editor.delete_selected(|n| n == 2).await.unwrap(), 2);

        let calls = editor.store().calls();
        let deletes: Vec<_> = calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Delete { .. }))
            .collect();
        assert_eq!(
            deletes,
            [&StoreCall::Delete {
                table: "teams".into(),
                ids: vec!["t4".into(), "t2".into()],
            }]
        );
        let left: Vec<_> = editor.state().rows().iter().map(|r| r["id"].clone()).collect();
        assert_eq!(left, ["t1", "t3", "t5"].map(CellValue::from));
    }

    #[tokio::test]
    async fn nothing_selected_never_asks() {
        let mut editor = editor().await;
        let deleted = editor
            .delete_selected(|_| panic!("should not ask without a selection"))
            .await
            .unwrap();
        assert_eq!(deleted, 0);
    }
}

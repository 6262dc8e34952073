use super::display::{display_value, CellEditor};
use crate::model::{is_editable, CellValue, Row, RowId};
use indexmap::IndexMap;
use log::warn;

/// Uncommitted edits: row id to the columns changed in that row. Iterates in
/// the order rows were first edited.
pub type PendingEdits = IndexMap<RowId, Row>;

/// Checkbox state per row id.
pub type SelectionSet = IndexMap<RowId, bool>;

/// In-memory state of the bulk-edit grid for one table.
///
/// Rows and columns are replaced wholesale on every load; pending edits and the
/// selection only ever refer to the rows of the current load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridState {
    table: Option<String>,
    rows: Vec<Row>,
    columns: Vec<String>,
    pending: PendingEdits,
    selection: SelectionSet,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn pending(&self) -> &PendingEdits {
        &self.pending
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True when at least one row is checked.
    pub fn has_selection(&self) -> bool {
        self.selection.values().any(|selected| *selected)
    }

    /// Switches to `table` and empties the grid until its rows arrive.
    pub fn begin_load(&mut self, table: &str) {
        self.table = Some(table.to_string());
        self.clear();
    }

    /// Installs freshly fetched rows. Columns are the keys of the first row; no
    /// rows means no columns. Pending edits and selection are dropped.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.columns = rows
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default();
        self.rows = rows;
        self.pending.clear();
        self.selection.clear();
    }

    /// Empties rows, columns, pending edits and selection. The table is kept.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns.clear();
        self.pending.clear();
        self.selection.clear();
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Records `value` as the new value of `column` in row `row_id`, replacing any
    /// earlier edit of the same cell. Store-managed columns are never edited.
    pub fn set_cell_value(&mut self, row_id: RowId, column: &str, value: CellValue) {
        if !is_editable(column) {
            warn!("ignoring edit of read-only column '{column}' in row {row_id}");
            return;
        }
        self.pending
            .entry(row_id)
            .or_default()
            .insert(column.to_string(), value);
    }

    /// Records text typed into a cell's input, keeping the type of the value the
    /// cell was loaded with (see [`CellValue::coerce_text`]).
    pub fn set_cell_text(&mut self, row_id: RowId, column: &str, text: String) {
        let original = self
            .row(&row_id)
            .and_then(|r| r.get(column))
            .cloned()
            .unwrap_or(CellValue::Null);
        let value = CellValue::coerce_text(&original, text);
        self.set_cell_value(row_id, column, value);
    }

    pub fn toggle_row_selection(&mut self, row_id: RowId, selected: bool) {
        self.selection.insert(row_id, selected);
    }

    /// Checks or unchecks every loaded row.
    pub fn toggle_select_all(&mut self, selected: bool) {
        self.selection = self
            .rows
            .iter()
            .filter_map(RowId::of)
            .map(|id| (id, selected))
            .collect();
    }

    pub fn is_selected(&self, row_id: &RowId) -> bool {
        self.selection.get(row_id).copied().unwrap_or(false)
    }

    /// State of the header checkbox: something is in the selection and all of it
    /// is checked.
    pub fn all_selected(&self) -> bool {
        !self.selection.is_empty() && self.selection.values().all(|selected| *selected)
    }

    /// Ids of the checked rows, in the order they were first toggled.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selection
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn row(&self, row_id: &RowId) -> Option<&Row> {
        self.rows
            .iter()
            .find(|r| RowId::of(r).as_ref() == Some(row_id))
    }

    /// The pending value of a cell if it was edited, its loaded value otherwise.
    pub fn current_value(&self, row: &Row, column: &str) -> CellValue {
        RowId::of(row)
            .and_then(|id| self.pending.get(&id))
            .and_then(|edits| edits.get(column))
            .or_else(|| row.get(column))
            .cloned()
            .unwrap_or(CellValue::Null)
    }

    pub fn display_value(&self, row: &Row, column: &str) -> String {
        display_value(column, &self.current_value(row, column))
    }

    /// Picks the editor for a cell. Store-managed columns are read only, columns
    /// loaded as booleans get a checkbox, everything else a text input.
    pub fn cell_editor(&self, row: &Row, column: &str) -> CellEditor {
        if !is_editable(column) {
            return CellEditor::ReadOnly(self.display_value(row, column));
        }
        let value = self.current_value(row, column);
        match row.get(column) {
            Some(CellValue::Bool(_)) => CellEditor::Checkbox(value == CellValue::Bool(true)),
            _ => CellEditor::Text(value.to_plain_text()),
        }
    }
}

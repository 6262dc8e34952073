//! In-memory store used by the unit tests. Records every call it receives.

use super::{RowStore, StoreError};
use crate::model::{CellValue, Row, RowId, ID_COLUMN};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StoreCall {
    Fetch { table: String, limit: Option<usize> },
    Update { table: String, id: RowId, changes: Row },
    Delete { table: String, ids: Vec<RowId> },
    Insert { table: String, rows: Vec<Row> },
    Count { table: String },
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: RefCell<HashMap<String, Vec<Row>>>,
    calls: RefCell<Vec<StoreCall>>,
    failing_updates: RefCell<HashSet<RowId>>,
    fail_fetch: Cell<bool>,
    fail_insert: Cell<bool>,
    next_id: Cell<u64>,
}

impl MemoryStore {
    pub(crate) fn with_table(self, table: &str, rows: Vec<Row>) -> Self {
        self.tables.borrow_mut().insert(table.to_string(), rows);
        self
    }

    pub(crate) fn fail_update_of(&self, id: &str) {
        self.failing_updates.borrow_mut().insert(RowId::new(id));
    }

    pub(crate) fn fail_fetches(&self) {
        self.fail_fetch.set(true);
    }

    pub(crate) fn fail_inserts(&self) {
        self.fail_insert.set(true);
    }

    pub(crate) fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.borrow().get(table).cloned().unwrap_or_default()
    }

    fn record(&self, call: StoreCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl RowStore for MemoryStore {
    async fn fetch_rows(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>, StoreError> {
        self.record(StoreCall::Fetch {
            table: table.to_string(),
            limit,
        });
        if self.fail_fetch.get() {
            return Err(StoreError::Transport("connection refused".into()));
        }
        let tables = self.tables.borrow();
        let rows = tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        Ok(rows.iter().take(limit.unwrap_or(usize::MAX)).cloned().collect())
    }

    async fn update_row(&self, table: &str, id: &RowId, changes: &Row) -> Result<(), StoreError> {
        self.record(StoreCall::Update {
            table: table.to_string(),
            id: id.clone(),
            changes: changes.clone(),
        });
        if self.failing_updates.borrow().contains(id) {
            return Err(StoreError::Backend(format!("update of {id} rejected")));
        }
        let mut tables = self.tables.borrow_mut();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        for row in rows.iter_mut().filter(|r| RowId::of(r).as_ref() == Some(id)) {
            for (column, value) in changes {
                row.insert(column.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn delete_rows(&self, table: &str, ids: &[RowId]) -> Result<(), StoreError> {
        self.record(StoreCall::Delete {
            table: table.to_string(),
            ids: ids.to_vec(),
        });
        let mut tables = self.tables.borrow_mut();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        rows.retain(|r| RowId::of(r).map_or(true, |id| !ids.contains(&id)));
        Ok(())
    }

    async fn insert_rows(&self, table: &str, rows: &[Row]) -> Result<(), StoreError> {
        self.record(StoreCall::Insert {
            table: table.to_string(),
            rows: rows.to_vec(),
        });
        if self.fail_insert.get() {
            return Err(StoreError::Backend("duplicate key value".into()));
        }
        let mut tables = self.tables.borrow_mut();
        let stored = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;
        for row in rows {
            let mut row = row.clone();
            if !row.contains_key(ID_COLUMN) {
                let next = self.next_id.get() + 1;
                self.next_id.set(next);
                row.shift_insert(0, ID_COLUMN.to_string(), CellValue::from(format!("gen-{next}")));
            }
            stored.push(row);
        }
        Ok(())
    }

    async fn count_rows(&self, table: &str) -> Result<u64, StoreError> {
        self.record(StoreCall::Count {
            table: table.to_string(),
        });
        self.tables
            .borrow()
            .get(table)
            .map(|rows| rows.len() as u64)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }
}

/// Builds a row from `(column, value)` pairs, keeping their order.
pub(crate) fn row<const N: usize>(cells: [(&str, CellValue); N]) -> Row {
    cells
        .into_iter()
        .map(|(column, value)| (column.to_string(), value))
        .collect()
}

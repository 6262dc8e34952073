//! SQLite implementation of the row store.
//!
//! Every operation opens its own connection on the configured database file,
//! the same way the rest of the backend talks to SQLite. Table and column names
//! coming from requests are checked against the live schema before they are
//! spliced into SQL.

mod values;

use actix_web::web;
use async_trait::async_trait;
use common::model::{CellValue, Row, RowId, ID_COLUMN, UPDATED_AT_COLUMN};
use common::store::{RowStore, StoreError};
use log::{debug, info};
use regex::Regex;
use rusqlite::{params_from_iter, Connection};
use std::path::PathBuf;
use values::{read_cell, write_cell, Column, ColumnKind};

const SCHEMA: &str = include_str!("schema.sql");
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

fn db_error(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

/// Columns of one table, in declaration order.
struct TableSchema {
    name: String,
    columns: Vec<Column>,
}

impl TableSchema {
    fn column(&self, name: &str) -> Result<&Column, StoreError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| StoreError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

impl SqliteStore {
    /// Opens the database at `path`, creating any missing tables.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.connect()?.execute_batch(SCHEMA).map_err(db_error)?;
        info!("database ready at {}", self.path.display());
        Ok(())
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path).map_err(db_error)
    }

    fn load_schema(conn: &Connection, table: &str) -> Result<TableSchema, StoreError> {
        let identifier = Regex::new(IDENTIFIER_PATTERN)
            .map_err(|e| StoreError::Backend(format!("Regex error: {}", e)))?;
        if !identifier.is_match(table) {
            return Err(StoreError::InvalidIdentifier(table.to_string()));
        }
        if table.starts_with("sqlite_") {
            return Err(StoreError::UnknownTable(table.to_string()));
        }

        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info(\"{table}\")"))
            .map_err(db_error)?;
        let columns = stmt
            .query_map([], |row| {
                let name: String = row.get(1)?;
                let decl: String = row.get(2)?;
                Ok(Column {
                    name,
                    kind: ColumnKind::from_decl(&decl),
                })
            })
            .map_err(db_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error)?;

        if columns.is_empty() {
            return Err(StoreError::UnknownTable(table.to_string()));
        }
        Ok(TableSchema {
            name: table.to_string(),
            columns,
        })
    }

    /// Resolves the columns a row writes to, rejecting names that are not valid
    /// identifiers or do not exist in the table.
    fn resolve_columns<'s>(schema: &'s TableSchema, row: &Row) -> Result<Vec<&'s Column>, StoreError> {
        let identifier = Regex::new(IDENTIFIER_PATTERN)
            .map_err(|e| StoreError::Backend(format!("Regex error: {}", e)))?;
        row.keys()
            .map(|name| {
                if !identifier.is_match(name) {
                    return Err(StoreError::InvalidIdentifier(name.clone()));
                }
                schema.column(name)
            })
            .collect()
    }

    fn fetch_sync(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>, StoreError> {
        let conn = self.connect()?;
        let schema = Self::load_schema(&conn, table)?;
        let column_list = quoted_list(schema.columns.iter().map(|c| c.name.as_str()));
        let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let mut stmt = conn
            .prepare(&format!("SELECT {column_list} FROM \"{table}\" ORDER BY rowid LIMIT ?1"))
            .map_err(db_error)?;
        let rows = stmt
            .query_map([limit], |r| {
                schema
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| Ok((column.name.clone(), read_cell(column.kind, r.get_ref(idx)?))))
                    .collect::<rusqlite::Result<Row>>()
            })
            .map_err(db_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_error)?;
        debug!("fetched {} rows from {table}", rows.len());
        Ok(rows)
    }

    fn update_sync(&self, table: &str, id: &RowId, changes: &Row) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let schema = Self::load_schema(&conn, table)?;
        let columns = Self::resolve_columns(&schema, changes)?;
        if columns.is_empty() {
            return Ok(());
        }

        let mut assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(idx, c)| format!("\"{}\" = ?{}", c.name, idx + 1))
            .collect();
        if schema.has_column(UPDATED_AT_COLUMN) && !changes.contains_key(UPDATED_AT_COLUMN) {
            assignments.push(format!("\"{UPDATED_AT_COLUMN}\" = {NOW_SQL}"));
        }

        let mut values = columns
            .iter()
            .zip(changes.values())
            .map(|(column, value)| write_cell(column, value))
            .collect::<Result<Vec<_>, _>>()?;
        values.push(rusqlite::types::Value::Text(id.as_str().to_string()));

        let sql = format!(
            "UPDATE \"{table}\" SET {} WHERE \"{ID_COLUMN}\" = ?{}",
            assignments.join(", "),
            values.len()
        );
        let changed = conn.execute(&sql, params_from_iter(values)).map_err(db_error)?;
        debug!("updated row {id} in {table} ({changed} changed)");
        Ok(())
    }

    fn delete_sync(&self, table: &str, ids: &[RowId]) -> Result<(), StoreError> {
        if ids.is_empty() {
            return Ok(());
        }
        let conn = self.connect()?;
        Self::load_schema(&conn, table)?;

        let placeholders = (1..=ids.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
        let sql = format!("DELETE FROM \"{table}\" WHERE \"{ID_COLUMN}\" IN ({placeholders})");
        let deleted = conn
            .execute(&sql, params_from_iter(ids.iter().map(RowId::as_str)))
            .map_err(db_error)?;
        info!("deleted {deleted} rows from {table}");
        Ok(())
    }

    fn insert_sync(&self, table: &str, rows: &[Row]) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let schema = Self::load_schema(&conn, table)?;
        let tx = conn.transaction().map_err(db_error)?;

        for row in rows {
            let mut row = row.clone();
            if row.get(ID_COLUMN).is_none_or(CellValue::is_null) {
                row.shift_insert(0, ID_COLUMN.to_string(), CellValue::from(uuid::Uuid::new_v4().to_string()));
            }
            let columns = Self::resolve_columns(&schema, &row)?;
            let values = columns
                .iter()
                .zip(row.values())
                .map(|(column, value)| write_cell(column, value))
                .collect::<Result<Vec<_>, _>>()?;

            let column_list = quoted_list(columns.iter().map(|c| c.name.as_str()));
            let placeholders = (1..=values.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
            tx.execute(
                &format!("INSERT INTO \"{table}\" ({column_list}) VALUES ({placeholders})"),
                params_from_iter(values),
            )
            .map_err(db_error)?;
        }

        tx.commit().map_err(db_error)?;
        info!("inserted {} rows into {table}", rows.len());
        Ok(())
    }

    fn count_sync(&self, table: &str) -> Result<u64, StoreError> {
        let conn = self.connect()?;
        Self::load_schema(&conn, table)?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |r| r.get(0))
            .map_err(db_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

fn quoted_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.map(|n| format!("\"{n}\"")).collect::<Vec<_>>().join(", ")
}

/// Runs `job` on actix's blocking pool so whole-table reads and bulk inserts
/// stay off the worker thread.
async fn blocking<T, F>(job: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    web::block(job)
        .await
        .map_err(|e| StoreError::Backend(format!("blocking task failed: {e}")))?
}

#[async_trait(?Send)]
impl RowStore for SqliteStore {
    async fn fetch_rows(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>, StoreError> {
        let store = self.clone();
        let table = table.to_string();
        blocking(move || store.fetch_sync(&table, limit)).await
    }

    async fn update_row(&self, table: &str, id: &RowId, changes: &Row) -> Result<(), StoreError> {
        self.update_sync(table, id, changes)
    }

    async fn delete_rows(&self, table: &str, ids: &[RowId]) -> Result<(), StoreError> {
        self.delete_sync(table, ids)
    }

    async fn insert_rows(&self, table: &str, rows: &[Row]) -> Result<(), StoreError> {
        let store = self.clone();
        let table = table.to_string();
        let rows = rows.to_vec();
        blocking(move || store.insert_sync(&table, &rows)).await
    }

    async fn count_rows(&self, table: &str) -> Result<u64, StoreError> {
        self.count_sync(table)
    }
}

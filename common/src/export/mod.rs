//! Whole-table CSV export.

use crate::csv::rows_to_csv;
use crate::store::{RowStore, StoreError};
use log::info;

pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// A rendered export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvFile {
    pub file_name: String,
    pub contents: String,
}

impl CsvFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

/// Fetches every row of `table` in one request and renders it as `<table>.csv`.
/// A failed fetch produces no file.
pub async fn export_table<S>(store: &S, table: &str) -> Result<CsvFile, StoreError>
where
    S: RowStore + ?Sized,
{
    let rows = store.fetch_rows(table, None).await?;
    info!("exporting {} rows of {table}", rows.len());
    Ok(CsvFile {
        file_name: format!("{table}.csv"),
        contents: rows_to_csv(&rows),
    })
}

//! CSV import into a table.
//!
//! An import reads the whole file as text, parses it with [`crate::csv`], drops
//! the store-managed columns and inserts everything with one bulk insert. There
//! is no type inference: every non-empty field is inserted as a string and left
//! for the store to coerce.

use crate::csv::{parse_csv, CsvError};
use crate::model::{Row, IMMUTABLE_COLUMNS};
use crate::store::{RowStore, StoreError};
use log::{info, warn};
use std::fmt::Display;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("file read error: {0}")]
    Read(String),

    #[error("CSV parse error: {0}")]
    Parse(#[from] CsvError),

    #[error("insert failed: {0}")]
    Store(#[from] StoreError),
}

/// Where an import currently is. Every failure lands in `Failed`; there is no
/// retry, a new import starts again from `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    Reading,
    Parsing,
    Inserting,
    Success { inserted: usize },
    Failed { message: String },
}

impl ImportState {
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ImportState::Reading | ImportState::Parsing | ImportState::Inserting
        )
    }
}

/// Parses CSV text into rows ready to insert, without `id`, `created_at` and
/// `updated_at`.
pub fn parse_import_rows(text: &str) -> Result<Vec<Row>, CsvError> {
    let mut rows = parse_csv(text)?.rows;
    for row in &mut rows {
        for column in IMMUTABLE_COLUMNS {
            row.shift_remove(column);
        }
    }
    Ok(rows)
}

/// Parses `text` and inserts its rows into `table`. Zero rows insert nothing.
pub async fn import_csv_text<S>(store: &S, table: &str, text: &str) -> Result<usize, ImportError>
where
    S: RowStore + ?Sized,
{
    let rows = parse_import_rows(text)?;
    insert_parsed(store, table, &rows).await
}

async fn insert_parsed<S>(store: &S, table: &str, rows: &[Row]) -> Result<usize, ImportError>
where
    S: RowStore + ?Sized,
{
    if rows.is_empty() {
        info!("nothing to import into {table}");
        return Ok(0);
    }
    store.insert_rows(table, rows).await?;
    info!("imported {} rows into {table}", rows.len());
    Ok(rows.len())
}

type Observer = Box<dyn FnMut(&ImportState)>;

/// Runs imports against one store and reports every state change.
pub struct CsvImporter<S> {
    store: S,
    state: ImportState,
    observer: Option<Observer>,
}

impl<S: RowStore> CsvImporter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: ImportState::Idle,
            observer: None,
        }
    }

    /// Calls `observer` with each state the importer enters.
    pub fn on_transition(mut self, observer: impl FnMut(&ImportState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    /// Imports the text produced by `read` into `table`, returning the number of
    /// rows inserted.
    pub async fn import_file<F, E>(&mut self, table: &str, read: F) -> Result<usize, ImportError>
    where
        F: Future<Output = Result<String, E>>,
        E: Display,
    {
        let result = self.run(table, read).await;
        match &result {
            Ok(inserted) => self.enter(ImportState::Success {
                inserted: *inserted,
            }),
            Err(e) => {
                warn!("import into {table} failed: {e}");
                self.enter(ImportState::Failed {
                    message: e.to_string(),
                });
            }
        }
        result
    }

    /// Imports already loaded CSV text.
    pub async fn import_text(&mut self, table: &str, text: String) -> Result<usize, ImportError> {
        self.import_file(table, async move { Ok::<_, ImportError>(text) })
            .await
    }

    async fn run<F, E>(&mut self, table: &str, read: F) -> Result<usize, ImportError>
    where
        F: Future<Output = Result<String, E>>,
        E: Display,
    {
        self.enter(ImportState::Reading);
        let text = read.await.map_err(|e| ImportError::Read(e.to_string()))?;

        self.enter(ImportState::Parsing);
        let rows = parse_import_rows(&text)?;

        self.enter(ImportState::Inserting);
        insert_parsed(&self.store, table, &rows).await
    }

    fn enter(&mut self, state: ImportState) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&state);
        }
        self.state = state;
    }
}

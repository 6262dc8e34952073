use common::grid::SaveError;
use common::model::{Row, RowId};
use common::store::StoreError;

pub enum Msg {
    Load,
    /// Rows fetched for the table named first.
    Loaded(String, Result<Vec<Row>, StoreError>),
    EditText { row_id: RowId, column: String, text: String },
    EditBool { row_id: RowId, column: String, value: bool },
    ToggleRow(RowId, bool),
    ToggleAll(bool),
    Save,
    Saved(Result<usize, SaveError>),
    DeleteSelected,
    Deleted(Result<usize, StoreError>),
}

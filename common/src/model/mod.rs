pub mod cell;
pub mod row;
pub mod table;

pub use cell::CellValue;
pub use row::{
    is_editable, Row, RowId, CREATED_AT_COLUMN, ID_COLUMN, IMMUTABLE_COLUMNS, UPDATED_AT_COLUMN,
};
pub use table::{find_table, TableDescriptor, EDITABLE_TABLES};

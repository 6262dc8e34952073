use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BulkEditProps {
    /// Key of the table being edited. Changing it reloads the grid.
    pub table: String,
}

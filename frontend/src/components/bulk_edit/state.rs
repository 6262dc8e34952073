use crate::store::HttpStore;
use common::grid::GridState;

pub struct BulkEditComponent {
    pub grid: GridState,
    pub store: HttpStore,

    /// A fetch is in flight; the table shows a loading line.
    pub is_loading: bool,

    /// A save or delete is in flight; both buttons are disabled.
    pub is_saving: bool,

    /// Message of the last failed load, shown in place of the table.
    pub error: Option<String>,

    /// Guard for the first-render load.
    pub loaded: bool,
}

impl BulkEditComponent {
    pub fn new() -> Self {
        Self {
            grid: GridState::new(),
            store: HttpStore,
            is_loading: false,
            is_saving: false,
            error: None,
            loaded: false,
        }
    }

    pub fn can_save(&self) -> bool {
        !self.is_saving && self.grid.has_pending()
    }

    pub fn can_delete(&self) -> bool {
        !self.is_saving && self.grid.has_selection()
    }
}

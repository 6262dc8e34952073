//! Update function for the bulk edit grid.
//!
//! Loading, saving and deleting run in `spawn_local` and report back with a
//! result message. A load result for a table other than the selected one is
//! dropped so that switching tables quickly never shows stale rows.

use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::grid::{delete_rows_by_id, fetch_grid_rows, save_pending};

use crate::helpers::{confirm, show_toast};

use super::messages::Msg;
use super::state::BulkEditComponent;

const LOAD_FAILED: &str = "אירעה שגיאה בטעינת הנתונים";
const SAVE_FAILED: &str = "אירעה שגיאה בשמירת השינויים";
const DELETE_FAILED: &str = "אירעה שגיאה במחיקת הרשומות";

pub fn update(component: &mut BulkEditComponent, ctx: &Context<BulkEditComponent>, msg: Msg) -> bool {
    match msg {
        Msg::Load => {
            let table = ctx.props().table.clone();
            component.grid.begin_load(&table);
            component.is_loading = true;
            component.error = None;

            let store = component.store;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = fetch_grid_rows(&store, &table).await;
                link.send_message(Msg::Loaded(table, result));
            });
            true
        }
        Msg::Loaded(table, result) => {
            if component.grid.table() != Some(table.as_str()) {
                return false;
            }
            component.is_loading = false;
            match result {
                Ok(rows) => component.grid.replace_rows(rows),
                Err(e) => {
                    error!(format!("loading {} failed: {}", table, e));
                    component.grid.clear();
                    component.error = Some(LOAD_FAILED.to_string());
                }
            }
            true
        }
        Msg::EditText { row_id, column, text } => {
            component.grid.set_cell_text(row_id, &column, text);
            true
        }
        Msg::EditBool { row_id, column, value } => {
            component.grid.set_cell_value(row_id, &column, value.into());
            true
        }
        Msg::ToggleRow(row_id, selected) => {
            component.grid.toggle_row_selection(row_id, selected);
            true
        }
        Msg::ToggleAll(selected) => {
            component.grid.toggle_select_all(selected);
            true
        }
        Msg::Save => {
            if !component.can_save() {
                return false;
            }
            let Some(table) = component.grid.table().map(str::to_string) else {
                return false;
            };
            component.is_saving = true;

            let store = component.store;
            let pending = component.grid.pending().clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = save_pending(&store, &table, &pending).await;
                link.send_message(Msg::Saved(result));
            });
            true
        }
        Msg::Saved(result) => {
            component.is_saving = false;
            match result {
                Ok(saved) => {
                    show_toast(&format!("השינויים נשמרו בהצלחה: {} רשומות עודכנו", saved));
                    component.grid.clear_pending();
                    ctx.link().send_message(Msg::Load);
                }
                Err(e) => {
                    error!(format!("save failed: {}", e));
                    show_toast(SAVE_FAILED);
                }
            }
            true
        }
        Msg::DeleteSelected => {
            if !component.can_delete() {
                return false;
            }
            let ids = component.grid.selected_ids();
            let question = format!("האם אתה בטוח שברצונך למחוק {} רשומות?", ids.len());
            if !confirm(&question) {
                return false;
            }
            let Some(table) = component.grid.table().map(str::to_string) else {
                return false;
            };
            component.is_saving = true;

            let store = component.store;
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = delete_rows_by_id(&store, &table, &ids).await;
                link.send_message(Msg::Deleted(result));
            });
            true
        }
        Msg::Deleted(result) => {
            component.is_saving = false;
            match result {
                Ok(deleted) => {
                    show_toast(&format!("הרשומות נמחקו בהצלחה: {} רשומות נמחקו", deleted));
                    ctx.link().send_message(Msg::Load);
                }
                Err(e) => {
                    error!(format!("delete failed: {}", e));
                    show_toast(DELETE_FAILED);
                }
            }
            true
        }
    }
}

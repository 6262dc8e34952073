use common::grid::CellEditor;
use common::model::{Row, RowId};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use crate::helpers::icon_button;

use super::messages::Msg;
use super::state::BulkEditComponent;

pub fn view(component: &BulkEditComponent, ctx: &Context<BulkEditComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="bulk-edit">
            <div class="bulk-edit-header">
                <h2>{ "עריכה מרוכזת" }</h2>
                <div class="icon-toolbar">
                    { icon_button("save", "שמור שינויים", link.callback(|_| Msg::Save), !component.can_save()) }
                    { icon_button("delete", "מחק נבחרים", link.callback(|_| Msg::DeleteSelected), !component.can_delete()) }
                </div>
            </div>
            { build_body(component, link) }
        </div>
    }
}

fn build_body(component: &BulkEditComponent, link: &Scope<BulkEditComponent>) -> Html {
    if component.is_loading {
        return html! { <div class="grid-message">{ "טוען..." }</div> };
    }
    if let Some(message) = &component.error {
        return html! { <div class="grid-message error">{ message }</div> };
    }
    if component.grid.rows().is_empty() {
        return html! { <div class="grid-message">{ "אין נתונים בטבלה זו" }</div> };
    }

    let all_selected = component.grid.all_selected();
    html! {
        <div class="grid-scroll">
            <table class="bulk-grid">
                <thead>
                    <tr>
                        <th>
                            <input
                                type="checkbox"
                                checked={all_selected}
                                onchange={link.callback(|e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    Msg::ToggleAll(input.checked())
                                })}
                            />
                        </th>
                        { for component.grid.columns().iter().map(|c| html! { <th>{ c }</th> }) }
                    </tr>
                </thead>
                <tbody>
                    { for component.grid.rows().iter().map(|row| build_row(component, link, row)) }
                </tbody>
            </table>
        </div>
    }
}

fn build_row(component: &BulkEditComponent, link: &Scope<BulkEditComponent>, row: &Row) -> Html {
    // Rows without an id cannot be addressed; show them read only.
    let Some(row_id) = RowId::of(row) else {
        return html! {
            <tr class="readonly-row">
                <td></td>
                { for component.grid.columns().iter().map(|c| html! {
                    <td>{ component.grid.display_value(row, c) }</td>
                }) }
            </tr>
        };
    };

    let selected = component.grid.is_selected(&row_id);
    let edited = component.grid.pending().contains_key(&row_id);
    let class = classes!(selected.then_some("selected"), edited.then_some("edited"));
    let toggle_id = row_id.clone();

    html! {
        <tr class={class}>
            <td>
                <input
                    type="checkbox"
                    checked={selected}
                    onchange={link.callback(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::ToggleRow(toggle_id.clone(), input.checked())
                    })}
                />
            </td>
            { for component.grid.columns().iter().map(|c| build_cell(component, link, row, &row_id, c)) }
        </tr>
    }
}

fn build_cell(
    component: &BulkEditComponent,
    link: &Scope<BulkEditComponent>,
    row: &Row,
    row_id: &RowId,
    column: &str,
) -> Html {
    let row_id = row_id.clone();
    let column = column.to_string();

    match component.grid.cell_editor(row, &column) {
        CellEditor::ReadOnly(text) => html! { <td class="readonly">{ text }</td> },
        CellEditor::Checkbox(checked) => html! {
            <td>
                <input
                    type="checkbox"
                    {checked}
                    onchange={link.callback(move |e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::EditBool { row_id: row_id.clone(), column: column.clone(), value: input.checked() }
                    })}
                />
            </td>
        },
        CellEditor::Text(text) => html! {
            <td>
                <input
                    type="text"
                    class="cell-input"
                    value={text}
                    oninput={link.callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::EditText { row_id: row_id.clone(), column: column.clone(), text: input.value() }
                    })}
                />
            </td>
        },
    }
}

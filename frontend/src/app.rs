//! Dashboard shell: the table selector and the tab bar.

use common::model::{find_table, EDITABLE_TABLES};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::bulk_edit::BulkEditComponent;
use crate::components::export::ExportComponent;
use crate::components::import::ImportComponent;
use crate::components::statistics::StatisticsComponent;

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    BulkEdit,
    Import,
    Export,
    Statistics,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::BulkEdit, Tab::Import, Tab::Export, Tab::Statistics];

    fn label(self) -> &'static str {
        match self {
            Tab::BulkEdit => "עריכה מרוכזת",
            Tab::Import => "ייבוא נתונים",
            Tab::Export => "ייצוא נתונים",
            Tab::Statistics => "סטטיסטיקות",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Tab::BulkEdit => "edit",
            Tab::Import => "upload_file",
            Tab::Export => "download",
            Tab::Statistics => "bar_chart",
        }
    }
}

pub enum Msg {
    SelectTable(String),
    SetTab(Tab),
}

pub struct App {
    table: String,
    tab: Tab,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            table: EDITABLE_TABLES[0].key.to_string(),
            tab: Tab::BulkEdit,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectTable(table) => {
                if table == self.table || find_table(&table).is_none() {
                    return false;
                }
                self.table = table;
                true
            }
            Msg::SetTab(tab) => {
                if tab == self.tab {
                    return false;
                }
                self.tab = tab;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let onchange = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SelectTable(select.value())
        });
        let label = find_table(&self.table)
            .map(|t| t.display_label)
            .unwrap_or_default();

        html! {
            <div class="admin-root" dir="rtl">
                <header class="admin-header">
                    <h1>{ "ניהול האקתון" }</h1>
                    if self.tab != Tab::Statistics {
                        <label class="table-select">
                            { "בחר טבלה" }
                            <select {onchange}>
                                { for EDITABLE_TABLES.iter().map(|t| html! {
                                    <option value={t.key} selected={t.key == self.table}>{ t.display_label }</option>
                                }) }
                            </select>
                        </label>
                    }
                </header>

                <nav class="tab-bar">
                    { for Tab::ALL.iter().map(|&tab| {
                        let class = if tab == self.tab { "tab active" } else { "tab" };
                        html! {
                            <button class={class} onclick={link.callback(move |_| Msg::SetTab(tab))}>
                                <i class="material-icons">{ tab.icon() }</i>
                                <span>{ tab.label() }</span>
                            </button>
                        }
                    }) }
                </nav>

                <main class="tab-content">
                    {
                        match self.tab {
                            Tab::BulkEdit => html! { <BulkEditComponent table={self.table.clone()} /> },
                            Tab::Import => html! { <ImportComponent table={self.table.clone()} /> },
                            Tab::Export => html! {
                                <ExportComponent table={self.table.clone()} table_label={label} />
                            },
                            Tab::Statistics => html! { <StatisticsComponent /> },
                        }
                    }
                </main>
            </div>
        }
    }
}

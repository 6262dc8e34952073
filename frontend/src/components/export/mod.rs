//! Whole-table CSV export as a browser download.

use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::export::{export_table, CsvFile};
use common::store::StoreError;

use crate::helpers::{alert, download_csv, icon_button};
use crate::store::HttpStore;

const EXPORT_FAILED: &str = "אירעה שגיאה בייצוא הנתונים";

#[derive(Properties, PartialEq, Clone)]
pub struct ExportProps {
    pub table: String,
    pub table_label: AttrValue,
}

pub enum Msg {
    Export,
    Exported(Result<CsvFile, StoreError>),
}

pub struct ExportComponent {
    is_exporting: bool,
}

impl Component for ExportComponent {
    type Message = Msg;
    type Properties = ExportProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { is_exporting: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Export => {
                if self.is_exporting {
                    return false;
                }
                self.is_exporting = true;
                let table = ctx.props().table.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = export_table(&HttpStore, &table).await;
                    link.send_message(Msg::Exported(result));
                });
                true
            }
            Msg::Exported(result) => {
                self.is_exporting = false;
                let downloaded = result
                    .map_err(|e| e.to_string())
                    .and_then(|file| download_csv(&file).map_err(|e| format!("{:?}", e)));
                if let Err(e) = downloaded {
                    error!(format!("export failed: {}", e));
                    alert(EXPORT_FAILED);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let label = if self.is_exporting { "מייצא..." } else { "ייצא ל-CSV" };
        html! {
            <div class="export-panel">
                <h2>{ "ייצוא נתונים" }</h2>
                <p class="hint">{ format!("כל הרשומות של {} יורדו כקובץ {}.csv", ctx.props().table_label, ctx.props().table) }</p>
                { icon_button("download", label, ctx.link().callback(|_| Msg::Export), self.is_exporting) }
            </div>
        }
    }
}

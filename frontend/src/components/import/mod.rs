//! CSV import into the selected table.
//!
//! The chosen file is read as text and handed to a `CsvImporter` running over
//! the HTTP store. Every importer transition is forwarded as a message so the
//! panel can show progress; the final result decides the message shown.

use gloo_console::error;
use gloo_file::{futures::read_as_text, Blob};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::import::{CsvImporter, ImportError, ImportState};

use crate::store::HttpStore;

mod view;

#[derive(Properties, PartialEq, Clone)]
pub struct ImportProps {
    pub table: String,
}

pub enum Msg {
    FileSelected(web_sys::File),
    Transition(ImportState),
    Finished(Result<usize, ImportError>),
}

pub struct ImportComponent {
    pub state: ImportState,
    /// Outcome of the last import, `Ok` for success text and `Err` for failure text.
    pub outcome: Option<Result<String, String>>,
    pub file_input_ref: NodeRef,
}

pub fn outcome_message(result: &Result<usize, ImportError>) -> Result<String, String> {
    match result {
        Ok(inserted) => Ok(format!("ייבוא הצליח! {} רשומות יובאו בהצלחה.", inserted)),
        Err(ImportError::Read(_)) => Err("שגיאה בקריאת הקובץ".to_string()),
        Err(ImportError::Parse(e)) => Err(format!("שגיאה בעיבוד הקובץ: {}", e)),
        Err(ImportError::Store(e)) => Err(format!("שגיאה בעיבוד הקובץ: {}", e)),
    }
}

impl Component for ImportComponent {
    type Message = Msg;
    type Properties = ImportProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            state: ImportState::Idle,
            outcome: None,
            file_input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => {
                if self.state.is_busy() {
                    return false;
                }
                self.outcome = None;

                let table = ctx.props().table.clone();
                let link = ctx.link().clone();
                let observer = ctx.link().callback(Msg::Transition);
                spawn_local(async move {
                    let mut importer =
                        CsvImporter::new(HttpStore).on_transition(move |state| observer.emit(state.clone()));
                    let blob = Blob::from(file);
                    let result = importer.import_file(&table, read_as_text(&blob)).await;
                    link.send_message(Msg::Finished(result));
                });
                true
            }
            Msg::Transition(state) => {
                self.state = state;
                true
            }
            Msg::Finished(result) => {
                if let Err(e) = &result {
                    error!(format!("import failed: {}", e));
                }
                self.outcome = Some(outcome_message(&result));
                // Let the same file be picked again.
                if let Some(input) = self.file_input_ref.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
                true
            }
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.outcome = None;
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}

use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{ImportComponent, Msg};

pub fn view(component: &ImportComponent, ctx: &Context<ImportComponent>) -> Html {
    let busy = component.state.is_busy();
    let onchange = ctx.link().batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input
            .files()
            .and_then(|files| files.get(0))
            .map(Msg::FileSelected)
    });

    html! {
        <div class="import-panel">
            <h2>{ "ייבוא נתונים" }</h2>
            <p class="hint">{ "בחר קובץ CSV שהשורה הראשונה שלו היא שמות העמודות" }</p>
            <input
                type="file"
                accept=".csv"
                ref={component.file_input_ref.clone()}
                disabled={busy}
                {onchange}
            />
            if busy {
                <div class="import-progress">{ "מייבא..." }</div>
            }
            {
                match &component.outcome {
                    Some(Ok(text)) => html! { <div class="import-result success">{ text }</div> },
                    Some(Err(text)) => html! { <div class="import-result error">{ text }</div> },
                    None => html! {},
                }
            }
        </div>
    }
}

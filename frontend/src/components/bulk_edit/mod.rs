//! Bulk edit: a spreadsheet-like grid over the first rows of one table.
//!
//! Cell edits and row checkboxes are kept locally in a `GridState`; "save"
//! writes the edited rows one by one and "delete" removes the checked rows in
//! one request. Both reload the table when they succeed.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

use messages::Msg;
use props::BulkEditProps;
pub use state::BulkEditComponent;

impl Component for BulkEditComponent {
    type Message = Msg;
    type Properties = BulkEditProps;

    fn create(_ctx: &Context<Self>) -> Self {
        BulkEditComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().table != old_props.table {
            ctx.link().send_message(Msg::Load);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Load);
        }
    }
}

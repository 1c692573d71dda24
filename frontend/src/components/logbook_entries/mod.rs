//! Student logbook page: filter bar, template lookup and the entry list with
//! inline editing.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::LogbookEntriesProps;
pub use state::LogbookEntries;

impl Component for LogbookEntries {
    type Message = Msg;
    type Properties = LogbookEntriesProps;

    fn create(_ctx: &Context<Self>) -> Self {
        LogbookEntries::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::ApplyFilter);
        }
    }
}

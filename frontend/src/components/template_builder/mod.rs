//! Template builder: admin editor for a logbook template and its schema.
//!
//! Wires the Yew `Component` implementation to the `update` and `view`
//! submodules. On first render an existing template is fetched when
//! `template_id` is given; otherwise an empty draft is edited.

use gloo_console::warn;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

use crate::api;
pub use messages::Msg;
pub use props::TemplateBuilderProps;
pub use state::TemplateBuilder;

impl Component for TemplateBuilder {
    type Message = Msg;
    type Properties = TemplateBuilderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut builder = TemplateBuilder::new(&ctx.props().session.user_id);
        builder.loading = ctx.props().template_id.is_some();
        builder
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

            if let Some(template_id) = ctx.props().template_id.clone() {
                let config = ctx.props().config.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api::fetch_template(&config, &template_id).await {
                        Ok(template) => link.send_message(Msg::Loaded(template)),
                        Err(err) => {
                            warn!("template load failed:", err.to_string());
                            link.send_message(Msg::LoadFailed(err.to_string()));
                        }
                    }
                });
            }
        }
    }
}

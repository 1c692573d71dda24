use uuid::Uuid;
use yew::{html, Callback, Component, Context, Html, NodeRef, Properties};

/// Sliding sheet anchored to the top of the viewport.
///
/// Hidden until [`open_top_sheet`] adds the `show` class to it.
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub title: String,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let node_ref = ctx.props().node_ref.clone();
        let on_close = Callback::from(move |_| close_top_sheet(node_ref.clone()));
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                <div class="top-sheet-header">
                    <span class="top-sheet-title">{ ctx.props().title.clone() }</span>
                    <button class="top-sheet-close" onclick={on_close}>{ "✕" }</button>
                </div>
                <div class="top-sheet-body">
                    { ctx.props().children.clone() }
                </div>
            </div>
        }
    }
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(top_sheet_ref, false);
}

// Deferred so the CSS transition starts from the rendered state.
fn toggle_show(top_sheet_ref: NodeRef, show: bool) {
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(50).await;
        if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
            let classes = top_sheet.class_list();
            let _ = if show {
                classes.add_1("show")
            } else {
                classes.remove_1("show")
            };
        }
    });
}

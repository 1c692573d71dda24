use std::rc::Rc;

use gloo_console::{error, log};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::entry_review::EntryReview;
use crate::components::logbook_entries::LogbookEntries;
use crate::components::template_builder::TemplateBuilder;
use crate::config::{load_session, AppConfig, Role, Session};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Logbook,
    Review,
    Builder,
}

impl Tab {
    fn label(&self) -> &'static str {
        match self {
            Tab::Logbook => "My logbook",
            Tab::Review => "Review",
            Tab::Builder => "Templates",
        }
    }
}

/// Pages a role may open, first one shown by default.
pub fn tabs_for(role: Role) -> &'static [Tab] {
    match role {
        Role::Student => &[Tab::Logbook],
        Role::Teacher => &[Tab::Review],
        Role::Admin => &[Tab::Builder, Tab::Review],
    }
}

pub enum Msg {
    SetTab(Tab),
    SetTemplateId(String),
    OpenTemplate,
    NewTemplate,
}

pub struct App {
    config: Rc<AppConfig>,
    session: Result<Option<Rc<Session>>, String>,
    tab: Option<Tab>,
    template_id_input: String,
    /// Template opened in the builder; bumping `builder_key` remounts it.
    template_id: Option<String>,
    builder_key: u32,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = Rc::new(AppConfig::from_build_env());
        let session = load_session().map(|s| s.map(Rc::new));
        match &session {
            Ok(Some(s)) => {
                log!("signed in as", s.user_id.as_str());
            }
            Ok(None) => {
                log!("no session found");
            }
            Err(err) => {
                error!("session error:", err.as_str());
            }
        }
        let tab = match &session {
            Ok(Some(s)) => tabs_for(s.role).first().copied(),
            _ => None,
        };
        Self {
            config,
            session,
            tab,
            template_id_input: String::new(),
            template_id: None,
            builder_key: 0,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetTab(tab) => self.tab = Some(tab),
            Msg::SetTemplateId(value) => {
                self.template_id_input = value;
                return false;
            }
            Msg::OpenTemplate => {
                let id = self.template_id_input.trim().to_string();
                if id.is_empty() {
                    return false;
                }
                self.template_id = Some(id);
                self.builder_key += 1;
            }
            Msg::NewTemplate => {
                self.template_id = None;
                self.builder_key += 1;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = match &self.session {
            Ok(Some(session)) => session.clone(),
            Ok(None) => return html! { <div class="app-message">{"Please sign in to use the logbook."}</div> },
            Err(err) => return html! { <div class="app-message">{ err.clone() }</div> },
        };
        let link = ctx.link();

        html! {
            <div class="app">
                <nav class="tab-bar">
                    { for tabs_for(session.role).iter().map(|tab| {
                        let tab = *tab;
                        html! {
                            <button
                                class={classes!("tab-btn", (self.tab == Some(tab)).then_some("active"))}
                                onclick={link.callback(move |_| Msg::SetTab(tab))}
                            >
                                { tab.label() }
                            </button>
                        }
                    }) }
                </nav>
                {
                    match self.tab {
                        Some(Tab::Logbook) => html! {
                            <LogbookEntries config={self.config.clone()} session={session.clone()} />
                        },
                        Some(Tab::Review) => html! {
                            <EntryReview config={self.config.clone()} session={session.clone()} />
                        },
                        Some(Tab::Builder) => html! {
                            <>
                                <div class="template-picker">
                                    <input
                                        type="text"
                                        placeholder="Template id"
                                        value={self.template_id_input.clone()}
                                        oninput={link.callback(|e: InputEvent| Msg::SetTemplateId(e.target_unchecked_into::<HtmlInputElement>().value()))}
                                    />
                                    <button class="btn" onclick={link.callback(|_| Msg::OpenTemplate)}>{"Open"}</button>
                                    <button class="btn btn-secondary" onclick={link.callback(|_| Msg::NewTemplate)}>{"New template"}</button>
                                </div>
                                <TemplateBuilder
                                    key={self.builder_key.to_string()}
                                    config={self.config.clone()}
                                    session={session.clone()}
                                    template_id={self.template_id.clone()}
                                />
                            </>
                        },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn students_only_see_their_logbook() {
        assert!(tabs_for(Role::Student) == [Tab::Logbook]);
        assert!(!tabs_for(Role::Teacher).contains(&Tab::Logbook));
        assert!(tabs_for(Role::Admin).first() == Some(&Tab::Builder));
    }
}

//! Teacher review panel.
//!
//! Entries of every reviewed student are fetched at once; each student's
//! request settles on its own, so one failure only marks that student.
//! Submitted entries can be approved or rejected with remarks.

use std::collections::HashMap;
use std::rc::Rc;

use common::fetch::{FetchState, RequestSequencer, RequestToken};
use common::model::entry::{EntryStatus, LogbookEntry};
use common::requests::{EntryQuery, ReviewUpdate};
use common::validation::FieldErrors;
use futures_util::future::join_all;
use gloo_console::{error, log};
use web_sys::HtmlTextAreaElement;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::components::field_input::{schema_form, FieldHandlers, FieldMode};
use crate::config::{AppConfig, Session};
use crate::helpers::{alert_banner, icon_button, show_toast};

type StudentEntries = FetchState<Vec<LogbookEntry>>;

pub enum Msg {
    Reload,
    Loaded(RequestToken, Vec<(String, StudentEntries)>),
    SetRemarks(String, String),
    Review(String, EntryStatus),
    Reviewed(LogbookEntry),
    ReviewFailed(String),
    DismissAlert,
}

#[derive(Properties, PartialEq, Clone)]
pub struct EntryReviewProps {
    pub config: Rc<AppConfig>,
    pub session: Rc<Session>,
}

pub struct EntryReview {
    students: Vec<(String, StudentEntries)>,
    /// Remarks typed per entry id.
    remarks: HashMap<String, String>,
    sequencer: RequestSequencer,
    reviewing: Option<String>,
    alert: Option<String>,
    loaded: bool,
}

impl EntryReview {
    fn find_entry(&self, entry_id: &str) -> Option<&LogbookEntry> {
        self.students
            .iter()
            .filter_map(|(_, state)| state.loaded())
            .flatten()
            .find(|entry| entry.id == entry_id)
    }

    /// Swaps in the reviewed entry. The review response carries no template,
    /// so the one already shown is kept.
    fn replace_entry(&mut self, mut updated: LogbookEntry) {
        for (_, state) in &mut self.students {
            if let FetchState::Loaded(entries) = state {
                if let Some(slot) = entries.iter_mut().find(|e| e.id == updated.id) {
                    if updated.template.is_none() {
                        updated.template = slot.template.take();
                    }
                    *slot = updated;
                    return;
                }
            }
        }
    }

    fn start_load(&mut self, ctx: &Context<Self>) {
        let token = self.sequencer.begin();
        let student_ids = ctx.props().session.student_ids.clone();
        self.students = student_ids
            .iter()
            .map(|id| (id.clone(), FetchState::Pending))
            .collect();

        let config = ctx.props().config.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            log!("loading entries for", student_ids.len(), "students");
            let requests = student_ids.iter().map(|student_id| {
                let query = EntryQuery {
                    include_template: true,
                    ..EntryQuery::for_student(student_id.clone())
                };
                let config = config.clone();
                async move { api::fetch_entries(&config, &query).await }
            });
            let results = join_all(requests).await;
            let states = student_ids
                .into_iter()
                .zip(results)
                .map(|(id, result)| {
                    if let Err(err) = &result {
                        error!("entries failed for", id.as_str(), err.to_string());
                    }
                    (id, StudentEntries::from(result))
                })
                .collect();
            link.send_message(Msg::Loaded(token, states));
        });
    }
}

impl Component for EntryReview {
    type Message = Msg;
    type Properties = EntryReviewProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            students: Vec::new(),
            remarks: HashMap::new(),
            sequencer: RequestSequencer::default(),
            reviewing: None,
            alert: None,
            loaded: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Reload => {
                self.start_load(ctx);
                true
            }
            Msg::Loaded(token, states) => {
                if !self.sequencer.is_current(token) {
                    log!("dropping stale review response");
                    return false;
                }
                self.students = states;
                true
            }
            Msg::SetRemarks(entry_id, text) => {
                self.remarks.insert(entry_id, text);
                false
            }
            Msg::Review(entry_id, status) => {
                if self.reviewing.is_some() {
                    return false;
                }
                let Some(entry) = self.find_entry(&entry_id) else {
                    return false;
                };
                if !entry.status.can_transition_to(status) {
                    self.alert = Some(format!(
                        "A {} entry cannot be {}",
                        entry.status.label().to_lowercase(),
                        status.label().to_lowercase()
                    ));
                    return true;
                }
                let remarks = self.remarks.get(&entry_id).cloned().unwrap_or_default();
                if status == EntryStatus::Rejected && remarks.trim().is_empty() {
                    self.alert = Some("Add remarks explaining the rejection".to_string());
                    return true;
                }

                let update = ReviewUpdate {
                    status,
                    teacher_id: ctx.props().session.user_id.clone(),
                    teacher_remarks: remarks,
                };
                self.reviewing = Some(entry_id.clone());
                self.alert = None;
                let config = ctx.props().config.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match api::review_entry(&config, &entry_id, &update).await {
                        Ok(entry) => link.send_message(Msg::Reviewed(entry)),
                        Err(err) => {
                            error!("review failed:", err.to_string());
                            link.send_message(Msg::ReviewFailed(err.to_string()));
                        }
                    }
                });
                true
            }
            Msg::Reviewed(entry) => {
                self.reviewing = None;
                self.remarks.remove(&entry.id);
                show_toast(&format!("Entry {}", entry.status.label().to_lowercase()));
                self.replace_entry(entry);
                true
            }
            Msg::ReviewFailed(message) => {
                self.reviewing = None;
                self.alert = Some(message);
                true
            }
            Msg::DismissAlert => {
                self.alert = None;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="entry-review">
                { alert_banner(self.alert.as_deref(), link.callback(|_| Msg::DismissAlert)) }
                <div class="icon-toolbar">
                    { icon_button("refresh", "Reload", link.callback(|_| Msg::Reload), false) }
                </div>
                {
                    if self.students.is_empty() {
                        html! { <p class="hint">{"No students are assigned to you."}</p> }
                    } else {
                        html! { <>{ for self.students.iter().map(|(id, state)| self.student_section(id, state, link)) }</> }
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Reload);
        }
    }
}

impl EntryReview {
    fn student_section(&self, student_id: &str, state: &StudentEntries, link: &Scope<Self>) -> Html {
        let body = match state {
            FetchState::Pending => html! { <div class="loading">{"Loading..."}</div> },
            FetchState::Failed(message) => html! {
                <div class="student-failed">{ format!("Could not load entries: {}", message) }</div>
            },
            FetchState::Loaded(entries) if entries.is_empty() => {
                html! { <p class="hint">{"No entries."}</p> }
            }
            FetchState::Loaded(entries) => html! {
                <>{ for entries.iter().map(|entry| self.entry_card(entry, link)) }</>
            },
        };
        html! {
            <section class="student-entries">
                <h3>{ student_id.to_string() }</h3>
                { body }
            </section>
        }
    }

    fn entry_card(&self, entry: &LogbookEntry, link: &Scope<Self>) -> Html {
        let handlers = FieldHandlers {
            on_value: Callback::noop(),
            on_file: Callback::noop(),
        };
        let fields = match &entry.template {
            Some(template) => schema_form(
                &template.dynamic_schema,
                &entry.dynamic_fields,
                &FieldErrors::default(),
                FieldMode::ReadOnly,
                &handlers,
            ),
            None => html! { <p class="hint">{"Template not included with this entry."}</p> },
        };
        let reviewable = entry.status == EntryStatus::Submitted;
        let busy = self.reviewing.is_some();
        let remarks_id = entry.id.clone();
        let approve_id = entry.id.clone();
        let reject_id = entry.id.clone();

        html! {
            <div class="entry-row">
                <div class="entry-row-header">
                    <span class={format!("status status-{}", entry.status.label().to_lowercase())}>
                        { entry.status.label() }
                    </span>
                </div>
                { fields }
                {
                    match entry.student_remarks.as_deref().filter(|r| !r.is_empty()) {
                        Some(text) => html! { <p class="remarks"><strong>{"Student remarks: "}</strong>{ text.to_string() }</p> },
                        None => html! {},
                    }
                }
                {
                    if reviewable {
                        html! {
                            <div class="review-actions">
                                <textarea
                                    rows="2"
                                    placeholder="Remarks"
                                    value={self.remarks.get(&entry.id).cloned().unwrap_or_default()}
                                    oninput={link.callback(move |e: InputEvent| {
                                        Msg::SetRemarks(remarks_id.clone(), e.target_unchecked_into::<HtmlTextAreaElement>().value())
                                    })}
                                />
                                { icon_button("check", "Approve", link.callback(move |_| Msg::Review(approve_id.clone(), EntryStatus::Approved)), busy) }
                                { icon_button("block", "Reject", link.callback(move |_| Msg::Review(reject_id.clone(), EntryStatus::Rejected)), busy) }
                            </div>
                        }
                    } else {
                        match entry.teacher_remarks.as_deref().filter(|r| !r.is_empty()) {
                            Some(text) => html! { <p class="remarks"><strong>{"Your remarks: "}</strong>{ text.to_string() }</p> },
                            None => html! {},
                        }
                    }
                }
            </div>
        }
    }
}

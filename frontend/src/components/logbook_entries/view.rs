use common::entries::{EntryDraft, EntryRow, RowId};
use common::model::entry::{EntryStatus, LogbookEntry};
use common::model::schema::TemplateSchema;
use common::validation::FieldErrors;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::components::field_input::{schema_form, FieldHandlers, FieldMode};
use crate::helpers::{alert_banner, icon_button, markdown_view};

use super::messages::{FilterField, Msg};
use super::state::LogbookEntries;

pub fn view(component: &LogbookEntries, ctx: &Context<LogbookEntries>) -> Html {
    let link = ctx.link();
    html! {
        <div class="logbook-entries">
            { alert_banner(component.alert.as_deref(), link.callback(|_| Msg::DismissAlert)) }
            { build_filter_bar(component, link) }
            {
                if component.loading {
                    html! { <div class="loading">{"Loading logbook..."}</div> }
                } else {
                    build_body(component, link)
                }
            }
        </div>
    }
}

fn build_filter_bar(component: &LogbookEntries, link: &Scope<LogbookEntries>) -> Html {
    let input = |field: FilterField, label: &str| {
        html! {
            <label class="filter">
                { label.to_string() }
                <input
                    type="text"
                    value={component.filter_value(field)}
                    onchange={link.callback(move |e: Event| {
                        Msg::SetFilter(field, e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            </label>
        }
    };
    html! {
        <div class="filter-bar">
            { input(FilterField::AcademicYear, "Academic year") }
            { input(FilterField::Batch, "Batch") }
            { input(FilterField::Subject, "Subject") }
            { input(FilterField::Module, "Module") }
            { icon_button("search", "Load", link.callback(|_| Msg::ApplyFilter), false) }
        </div>
    }
}

fn build_body(component: &LogbookEntries, link: &Scope<LogbookEntries>) -> Html {
    let Some(template) = &component.template else {
        return html! { <p class="hint">{"Choose filters and load to see your logbook."}</p> };
    };
    html! {
        <>
            <div class="template-header">
                <h2>{ template.name.clone() }</h2>
                <div class="template-description">{ markdown_view(&template.description) }</div>
                { icon_button("add", "New entry", link.callback(|_| Msg::NewEntry), component.saving.is_some()) }
            </div>
            {
                if component.entries.is_empty() {
                    html! { <p class="hint">{"No entries yet."}</p> }
                } else {
                    html! {
                        <div class="entry-list">
                            { for component.entries.rows().iter().map(|row| build_row(component, row, link)) }
                        </div>
                    }
                }
            }
        </>
    }
}

fn status_badge(status: EntryStatus) -> Html {
    let class = format!("status status-{}", status.label().to_lowercase());
    html! { <span {class}>{ status.label() }</span> }
}

fn build_row(component: &LogbookEntries, row: &EntryRow, link: &Scope<LogbookEntries>) -> Html {
    let id = row.id();
    let schema = component.schema_for_row(&id).unwrap_or_default();
    match row {
        EntryRow::Pending { draft, .. } => html! {
            <div class="entry-row pending">
                <div class="entry-row-header">
                    <span class="status status-new">{"New"}</span>
                </div>
                { build_editor(component, &id, &schema, draft, link) }
            </div>
        },
        EntryRow::Persisted { entry, editing } => html! {
            <div class="entry-row">
                <div class="entry-row-header">
                    { status_badge(entry.status) }
                    {
                        if editing.is_none() && entry.status.is_editable() {
                            let server_id = entry.id.clone();
                            icon_button("edit", "Edit", link.callback(move |_| Msg::Edit(server_id.clone())), false)
                        } else {
                            html! {}
                        }
                    }
                </div>
                {
                    match editing {
                        Some(draft) => build_editor(component, &id, &schema, draft, link),
                        None => build_read_only(entry, &schema),
                    }
                }
            </div>
        },
    }
}

fn build_read_only(entry: &LogbookEntry, schema: &TemplateSchema) -> Html {
    let handlers = FieldHandlers {
        on_value: Callback::noop(),
        on_file: Callback::noop(),
    };
    html! {
        <>
            { schema_form(schema, &entry.dynamic_fields, &FieldErrors::default(), FieldMode::ReadOnly, &handlers) }
            { remarks_line("Your remarks", entry.student_remarks.as_deref()) }
            { remarks_line("Teacher remarks", entry.teacher_remarks.as_deref()) }
        </>
    }
}

fn remarks_line(label: &str, remarks: Option<&str>) -> Html {
    match remarks.filter(|r| !r.trim().is_empty()) {
        Some(text) => html! {
            <p class="remarks"><strong>{ format!("{}: ", label) }</strong>{ text.to_string() }</p>
        },
        None => html! {},
    }
}

fn build_editor(
    component: &LogbookEntries,
    id: &RowId,
    schema: &TemplateSchema,
    draft: &EntryDraft,
    link: &Scope<LogbookEntries>,
) -> Html {
    let handlers = {
        let value_id = id.clone();
        let file_id = id.clone();
        FieldHandlers {
            on_value: link.callback(move |(key, value)| Msg::SetValue(value_id.clone(), key, value)),
            on_file: link.callback(move |(key, file)| Msg::SetFile(file_id.clone(), key, file)),
        }
    };
    let busy = component.saving.is_some();
    let remarks_id = id.clone();
    let draft_id = id.clone();
    let submit_id = id.clone();
    let cancel_id = id.clone();

    html! {
        <div class="entry-editor">
            { schema_form(schema, &draft.bag, &draft.errors, FieldMode::Edit, &handlers) }
            <label class="wide">
                {"Remarks"}
                <textarea
                    rows="2"
                    value={draft.remarks.clone()}
                    oninput={link.callback(move |e: InputEvent| {
                        Msg::SetRemarks(remarks_id.clone(), e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                />
            </label>
            <div class="entry-actions">
                { icon_button("save", "Save draft", link.callback(move |_| Msg::Save(draft_id.clone(), EntryStatus::Draft)), busy) }
                { icon_button("send", "Submit", link.callback(move |_| Msg::Save(submit_id.clone(), EntryStatus::Submitted)), busy) }
                { icon_button("close", "Cancel", link.callback(move |_| Msg::Cancel(cancel_id.clone())), busy) }
            </div>
        </div>
    }
}

//! Update function for the student logbook page.
//!
//! Loads run through the page's `RequestSequencer`; anything answered for a
//! superseded token is logged and ignored. Saving builds the payload through
//! `EntryDraft::to_payload`, so nothing reaches the network while a field is
//! invalid.

use common::api::ApiError;
use common::entries::{EntryDraft, EntryList, RowId};
use common::model::entry::{EntryStatus, LogbookEntry};
use common::model::template::{Template, TemplateFilter};
use common::requests::EntryQuery;
use common::submission::SubmissionContext;
use gloo_console::{error, log, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::config::AppConfig;
use crate::helpers::show_toast;

use super::messages::Msg;
use super::state::LogbookEntries;

async fn load_page(
    config: &AppConfig,
    filter: &TemplateFilter,
    student_id: &str,
) -> Result<(Option<Template>, Vec<LogbookEntry>), ApiError> {
    let Some(template) = api::fetch_templates(config, filter).await? else {
        return Ok((None, Vec::new()));
    };
    let query = EntryQuery {
        log_book_template_id: Some(template.id.clone()),
        include_template: true,
        ..EntryQuery::for_student(student_id)
    };
    let entries = api::fetch_entries(config, &query).await?;
    Ok((Some(template), entries))
}

fn start_load(component: &mut LogbookEntries, ctx: &Context<LogbookEntries>) {
    let token = component.sequencer.begin();
    component.loading = true;
    component.alert = None;

    let config = ctx.props().config.clone();
    let student_id = ctx.props().session.user_id.clone();
    let filter = component.filter.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        match load_page(&config, &filter, &student_id).await {
            Ok((template, entries)) => link.send_message(Msg::Loaded(token, template, entries)),
            Err(err) => {
                error!("logbook load failed:", err.to_string());
                link.send_message(Msg::LoadFailed(token, err.to_string()));
            }
        }
    });
}

pub fn update(component: &mut LogbookEntries, ctx: &Context<LogbookEntries>, msg: Msg) -> bool {
    match msg {
        Msg::SetFilter(field, value) => {
            component.set_filter(field, value);
            false
        }
        Msg::ApplyFilter => {
            start_load(component, ctx);
            true
        }
        Msg::Loaded(token, template, entries) => {
            if !component.sequencer.is_current(token) {
                log!("dropping stale logbook response");
                return false;
            }
            component.loading = false;
            component.files.clear();
            component.entries = EntryList::from_server(entries);
            if template.is_none() {
                component.alert = Some("No logbook template matches these filters".to_string());
            }
            component.template = template;
            true
        }
        Msg::LoadFailed(token, message) => {
            if !component.sequencer.is_current(token) {
                return false;
            }
            component.loading = false;
            component.alert = Some(message);
            true
        }
        Msg::NewEntry => {
            let Some(template) = &component.template else {
                return false;
            };
            let session = &ctx.props().session;
            let draft = EntryDraft::new(
                &template.dynamic_schema,
                SubmissionContext {
                    template_id: template.id.clone(),
                    student_id: session.user_id.clone(),
                    teacher_id: session.teacher_id.clone(),
                },
            );
            component.entries.begin_new(draft);
            true
        }
        Msg::Edit(id) => {
            let schema = component
                .entries
                .get(&RowId::Server(id.clone()))
                .and_then(|row| row.persisted())
                .and_then(|entry| component.schema_for(entry))
                .cloned();
            match schema {
                Some(schema) => {
                    if !component.entries.begin_edit(&id, &schema) {
                        component.alert = Some("This entry can no longer be edited".to_string());
                    }
                }
                None => component.alert = Some("The template of this entry is not loaded".to_string()),
            }
            true
        }
        Msg::Cancel(id) => {
            component.entries.cancel(&id);
            component.drop_files_of(&id);
            true
        }
        Msg::SetValue(id, key, value) => {
            let Some(schema) = component.schema_for_row(&id) else {
                return false;
            };
            match component.entries.draft_mut(&id) {
                Some(draft) => {
                    draft.set_value(&schema, &key, value);
                    true
                }
                None => false,
            }
        }
        Msg::SetFile(id, key, file) => {
            match file {
                Some(file) => {
                    component.files.insert((id, key), file);
                }
                None => {
                    component.files.remove(&(id, key));
                }
            }
            false
        }
        Msg::SetRemarks(id, remarks) => match component.entries.draft_mut(&id) {
            Some(draft) => {
                draft.remarks = remarks;
                true
            }
            None => false,
        },
        Msg::Save(id, status) => save(component, ctx, id, status),
        Msg::Saved(id, entry) => {
            component.saving = None;
            let stored = match &id {
                RowId::Local(local_id) => component.entries.confirm_new(local_id, entry.clone()),
                RowId::Server(_) => component.entries.replace_persisted(entry.clone()),
            };
            if !stored {
                warn!("saved entry has no matching row", entry.id.as_str());
            }
            component.drop_files_of(&id);
            show_toast(match entry.status {
                EntryStatus::Submitted => "Entry submitted",
                _ => "Draft saved",
            });
            true
        }
        Msg::SaveFailed(_id, message) => {
            component.saving = None;
            component.alert = Some(message);
            true
        }
        Msg::DismissAlert => {
            component.alert = None;
            true
        }
    }
}

fn save(
    component: &mut LogbookEntries,
    ctx: &Context<LogbookEntries>,
    id: RowId,
    status: EntryStatus,
) -> bool {
    if component.saving.is_some() {
        return false;
    }
    let Some(schema) = component.schema_for_row(&id) else {
        return false;
    };
    let current = component
        .entries
        .get(&id)
        .and_then(|row| row.persisted())
        .map_or(EntryStatus::Draft, |entry| entry.status);
    if !current.can_transition_to(status) {
        component.alert = Some(format!(
            "A {} entry cannot be saved as {}",
            current.label().to_lowercase(),
            status.label().to_lowercase()
        ));
        return true;
    }

    let options = ctx.props().config.submission_options();
    let Some(draft) = component.entries.draft_mut(&id) else {
        return false;
    };
    let payload = match draft.to_payload(&schema, status, options) {
        Ok(payload) => payload,
        Err(err) => {
            component.alert = Some(err.to_string());
            return true;
        }
    };

    component.saving = Some(id.clone());
    component.alert = None;
    let config = ctx.props().config.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = match &id {
            RowId::Local(_) => api::create_entry(&config, &payload).await,
            RowId::Server(server_id) => api::update_entry(&config, server_id, &payload).await,
        };
        match result {
            Ok(entry) => {
                log!("entry saved", entry.id.as_str());
                link.send_message(Msg::Saved(id, entry));
            }
            Err(err) => {
                error!("entry save failed:", err.to_string());
                link.send_message(Msg::SaveFailed(id, err.to_string()));
            }
        }
    });
    true
}

//! Update function for the template builder.
//!
//! Schema edits go straight to `common::builder`; every message that touches
//! the draft ends with `refresh` so lint issues and the dirty flag follow.

use common::builder;
use common::model::template::TemplateDraft;
use gloo_console::{error, log};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::helpers::show_toast;
use crate::tops_sheet::yw_material_top_sheet::open_top_sheet;

use super::messages::Msg;
use super::state::TemplateBuilder;

pub fn update(component: &mut TemplateBuilder, ctx: &Context<TemplateBuilder>, msg: Msg) -> bool {
    let schema = &mut component.draft.dynamic_schema;
    match msg {
        Msg::Loaded(template) => {
            component.draft = TemplateDraft::from_template(&template, &ctx.props().session.user_id);
            component.loading = false;
            component.mark_saved();
            return true;
        }
        Msg::LoadFailed(message) => {
            component.loading = false;
            component.alert = Some(message);
            return true;
        }
        Msg::SetName(name) => component.draft.name = name,
        Msg::SetDescription(description) => component.draft.description = description,
        Msg::SetType(template_type) => component.draft.template_type = template_type,
        Msg::SetSubject(subject) => {
            let subject = subject.trim().to_string();
            component.draft.subject_id = (!subject.is_empty()).then_some(subject);
        }
        Msg::AddGroup => builder::add_group(schema),
        Msg::RemoveGroup(index) => builder::remove_group(schema, index),
        Msg::RenameGroup(index, name) => builder::update_group_name(schema, index, name),
        Msg::MoveGroupUp(index) => builder::move_group_up(schema, index),
        Msg::MoveGroupDown(index) => builder::move_group_down(schema, index),
        Msg::AddField(group) => builder::add_field(schema, group),
        Msg::RemoveField(group, field) => builder::remove_field(schema, group, field),
        Msg::PatchField(group, field, patch) => builder::update_field(schema, group, field, patch),
        Msg::MoveFieldUp(group, field) => builder::move_field_up(schema, group, field),
        Msg::MoveFieldDown(group, field) => builder::move_field_down(schema, group, field),
        Msg::OpenPreview => {
            open_top_sheet(component.preview_ref.clone());
            return false;
        }
        Msg::Save => {
            if component.saving {
                return false;
            }
            if !component.issues.is_empty() {
                component.alert = Some(format!(
                    "Fix {} issue(s) before saving the template",
                    component.issues.len()
                ));
                return true;
            }
            if component.draft.name.trim().is_empty() {
                component.alert = Some("The template needs a name".to_string());
                return true;
            }

            component.saving = true;
            component.alert = None;
            let draft = component.draft.clone();
            let config = ctx.props().config.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::save_template(&config, &draft).await {
                    Ok(template) => link.send_message(Msg::Saved(template)),
                    Err(err) => {
                        error!("template save failed:", err.to_string());
                        link.send_message(Msg::SaveFailed(err.to_string()));
                    }
                }
            });
            return true;
        }
        Msg::Saved(template) => {
            log!("template saved", template.id.as_str());
            component.saving = false;
            component.draft = TemplateDraft::from_template(&template, &ctx.props().session.user_id);
            component.mark_saved();
            show_toast("Template saved");
            return true;
        }
        Msg::SaveFailed(message) => {
            component.saving = false;
            component.alert = Some(message);
            return true;
        }
        Msg::DismissAlert => {
            component.alert = None;
            return true;
        }
    }

    component.refresh();
    true
}

//! View of the template builder: metadata form, group and field editors,
//! lint list and the preview sheet.

use common::builder::{parse_options, FieldPatch};
use common::model::field::{FieldDefinition, FieldType, FieldValue};
use common::model::schema::FieldGroup;
use common::model::template::TemplateType;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::components::template_preview::TemplatePreview;
use crate::helpers::{alert_banner, icon_button};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::messages::Msg;
use super::state::TemplateBuilder;

pub fn view(component: &TemplateBuilder, ctx: &Context<TemplateBuilder>) -> Html {
    let link = ctx.link();
    let draft = &component.draft;

    html! {
        <div class="template-builder">
            { alert_banner(component.alert.as_deref(), link.callback(|_| Msg::DismissAlert)) }
            { build_toolbar(component, link) }
            {
                if component.loading {
                    html! { <div class="loading">{"Loading template..."}</div> }
                } else {
                    html! {
                        <>
                            { build_metadata(component, link) }
                            { build_issues(component) }
                            <div class="group-list">
                                { for draft.dynamic_schema.groups.iter().enumerate().map(|(index, group)| {
                                    build_group(index, group, draft.dynamic_schema.groups.len(), link)
                                }) }
                            </div>
                        </>
                    }
                }
            }
            <YwMaterialTopSheet node_ref={component.preview_ref.clone()} title={"Preview".to_string()}>
                <TemplatePreview
                    schema={draft.dynamic_schema.clone()}
                    name={draft.name.clone()}
                    description={draft.description.clone()}
                />
            </YwMaterialTopSheet>
        </div>
    }
}

fn build_toolbar(component: &TemplateBuilder, link: &Scope<TemplateBuilder>) -> Html {
    let dirty = component.is_dirty();
    html! {
        <div class="icon-toolbar">
            { icon_button("playlist_add", "Add group", link.callback(|_| Msg::AddGroup), false) }
            { icon_button("visibility", "Preview", link.callback(|_| Msg::OpenPreview), false) }
            { icon_button("save", "Save", link.callback(|_| Msg::Save), component.saving) }
            {
                if dirty {
                    html! { <span class="dirty-dot" title="Unsaved changes" /> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_metadata(component: &TemplateBuilder, link: &Scope<TemplateBuilder>) -> Html {
    let draft = &component.draft;
    html! {
        <div class="template-metadata">
            <label>
                {"Name"}
                <input
                    type="text"
                    value={draft.name.clone()}
                    oninput={link.callback(|e: InputEvent| Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value()))}
                />
            </label>
            <label>
                {"Type"}
                <select onchange={link.callback(|e: Event| {
                    let value = e.target_unchecked_into::<HtmlSelectElement>().value();
                    Msg::SetType(if value == TemplateType::Subject.as_str() { TemplateType::Subject } else { TemplateType::General })
                })}>
                    { for [TemplateType::General, TemplateType::Subject].into_iter().map(|kind| html! {
                        <option value={kind.as_str()} selected={kind == draft.template_type}>{ kind.as_str() }</option>
                    }) }
                </select>
            </label>
            {
                if draft.template_type == TemplateType::Subject {
                    html! {
                        <label>
                            {"Subject"}
                            <input
                                type="text"
                                value={draft.subject_id.clone().unwrap_or_default()}
                                onchange={link.callback(|e: Event| Msg::SetSubject(e.target_unchecked_into::<HtmlInputElement>().value()))}
                            />
                        </label>
                    }
                } else {
                    html! {}
                }
            }
            <label class="wide">
                {"Description (markdown)"}
                <textarea
                    rows="3"
                    value={draft.description.clone()}
                    oninput={link.callback(|e: InputEvent| Msg::SetDescription(e.target_unchecked_into::<HtmlTextAreaElement>().value()))}
                />
            </label>
        </div>
    }
}

fn build_issues(component: &TemplateBuilder) -> Html {
    if component.issues.is_empty() {
        return html! {};
    }
    html! {
        <ul class="schema-issues">
            { for component.issues.iter().map(|issue| html! { <li>{ issue.to_string() }</li> }) }
        </ul>
    }
}

fn build_group(index: usize, group: &FieldGroup, group_count: usize, link: &Scope<TemplateBuilder>) -> Html {
    html! {
        <div class="builder-group">
            <div class="builder-group-header">
                <input
                    type="text"
                    class="group-name"
                    value={group.group_name.clone()}
                    oninput={link.callback(move |e: InputEvent| Msg::RenameGroup(index, e.target_unchecked_into::<HtmlInputElement>().value()))}
                />
                { icon_button("arrow_upward", "Up", link.callback(move |_| Msg::MoveGroupUp(index)), index == 0) }
                { icon_button("arrow_downward", "Down", link.callback(move |_| Msg::MoveGroupDown(index)), index + 1 >= group_count) }
                { icon_button("add", "Add field", link.callback(move |_| Msg::AddField(index)), false) }
                { icon_button("delete", "Remove group", link.callback(move |_| Msg::RemoveGroup(index)), false) }
            </div>
            { for group.fields.iter().enumerate().map(|(field_index, field)| {
                build_field(index, field_index, field, group.fields.len(), link)
            }) }
        </div>
    }
}

fn type_from_select(value: &str) -> FieldType {
    FieldType::from(value.to_string())
}

fn build_field(
    group: usize,
    index: usize,
    field: &FieldDefinition,
    field_count: usize,
    link: &Scope<TemplateBuilder>,
) -> Html {
    let patch = move |change: FieldPatch| Msg::PatchField(group, index, change);
    let mut type_choices: Vec<FieldType> = FieldType::AUTHORABLE.to_vec();
    if !type_choices.contains(&field.field_type) {
        type_choices.push(field.field_type.clone());
    }

    html! {
        <div class="builder-field">
            <input
                type="text"
                placeholder="Label"
                value={field.field_label.clone()}
                oninput={link.callback(move |e: InputEvent| patch(FieldPatch::label(e.target_unchecked_into::<HtmlInputElement>().value())))}
            />
            <span class="field-key" title="Stored as">{ field.key() }</span>
            <select onchange={link.callback(move |e: Event| {
                patch(FieldPatch::field_type(type_from_select(&e.target_unchecked_into::<HtmlSelectElement>().value())))
            })}>
                { for type_choices.iter().map(|choice| html! {
                    <option value={choice.as_str().to_string()} selected={*choice == field.field_type}>{ choice.label().to_string() }</option>
                }) }
            </select>
            <label class="inline">
                <input
                    type="checkbox"
                    checked={field.is_required}
                    onchange={link.callback(move |e: Event| patch(FieldPatch::required(e.target_unchecked_into::<HtmlInputElement>().checked())))}
                />
                {"Required"}
            </label>
            {
                if field.field_type == FieldType::Select {
                    html! {
                        <input
                            type="text"
                            placeholder="Options, comma separated"
                            value={field.options.join(", ")}
                            onchange={link.callback(move |e: Event| patch(FieldPatch::options(parse_options(&e.target_unchecked_into::<HtmlInputElement>().value()))))}
                        />
                    }
                } else {
                    html! {}
                }
            }
            <input
                type="text"
                placeholder="Default value"
                value={field.default_value.as_ref().map(FieldValue::as_input_text).unwrap_or_default()}
                onchange={link.callback(move |e: Event| {
                    let raw = e.target_unchecked_into::<HtmlInputElement>().value();
                    patch(FieldPatch::default_value((!raw.is_empty()).then(|| FieldValue::Text(raw))))
                })}
            />
            <input
                type="text"
                placeholder="Validation pattern"
                value={field.validation_regex.clone().unwrap_or_default()}
                onchange={link.callback(move |e: Event| {
                    patch(FieldPatch::validation_regex(Some(e.target_unchecked_into::<HtmlInputElement>().value())))
                })}
            />
            { icon_button("arrow_upward", "Up", link.callback(move |_| Msg::MoveFieldUp(group, index)), index == 0) }
            { icon_button("arrow_downward", "Down", link.callback(move |_| Msg::MoveFieldDown(group, index)), index + 1 >= field_count) }
            { icon_button("delete", "Remove", link.callback(move |_| Msg::RemoveField(group, index)), false) }
        </div>
    }
}

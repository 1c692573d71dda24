//! Turns schema fields into form controls.
//!
//! Rendering is a pure function of the field definition, its current value and
//! its error. Edits leave through [`FieldHandlers`]; the caller decides where
//! the value goes (usually `EntryDraft::set_value`). Picked files never enter
//! the value bag: only the file name does, and the `File` itself is handed to
//! `on_file` so the caller can keep it next to the draft.

use common::model::field::{FieldDefinition, FieldType, FieldValue};
use common::model::schema::{FieldGroup, TemplateSchema};
use common::model::value_bag::ValueBag;
use common::validation::{FieldErrors, FieldKey};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    Edit,
    ReadOnly,
}

#[derive(Clone, PartialEq)]
pub struct FieldHandlers {
    pub on_value: Callback<(FieldKey, FieldValue)>,
    pub on_file: Callback<(FieldKey, Option<web_sys::File>)>,
}

pub fn select_placeholder(label: &str) -> String {
    format!("Select {}", label)
}

pub fn unsupported_message(type_name: &str) -> String {
    format!("Unsupported type: {}", type_name)
}

/// Value as written into the control. Date inputs only accept `YYYY-MM-DD`,
/// so a stored timestamp is cut at its time part.
pub fn control_value(field_type: &FieldType, value: &FieldValue) -> String {
    let text = value.as_input_text();
    match field_type {
        FieldType::Date => text.split('T').next().unwrap_or_default().to_string(),
        _ => text,
    }
}

/// Which control an editable field renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind<'a> {
    Input(&'static str),
    Textarea,
    Select,
    File,
    Unsupported(&'a str),
}

pub fn control_kind(field_type: &FieldType) -> ControlKind<'_> {
    match field_type {
        FieldType::Text => ControlKind::Input("text"),
        FieldType::Number => ControlKind::Input("number"),
        FieldType::Date => ControlKind::Input("date"),
        FieldType::Textarea => ControlKind::Textarea,
        FieldType::Select => ControlKind::Select,
        FieldType::File => ControlKind::File,
        FieldType::Unsupported(name) => ControlKind::Unsupported(name),
    }
}

/// One `<option>` of a select control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectChoice {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

/// Placeholder first, then the field's options. The placeholder is the
/// selected one while `current` is empty.
pub fn select_choices(field: &FieldDefinition, current: &str) -> Vec<SelectChoice> {
    let placeholder = SelectChoice {
        value: String::new(),
        label: select_placeholder(&field.field_label),
        selected: current.is_empty(),
        disabled: true,
    };
    std::iter::once(placeholder)
        .chain(field.options.iter().map(|option| SelectChoice {
            value: option.clone(),
            label: option.clone(),
            selected: !current.is_empty() && option == current,
            disabled: false,
        }))
        .collect()
}

fn input_id(key: &FieldKey) -> String {
    format!("field-{}-{}", key.group, key.field).replace(char::is_whitespace, "-")
}

/// One labelled control with its error line.
pub fn field_input(
    group: &FieldGroup,
    field: &FieldDefinition,
    value: &FieldValue,
    error: &str,
    mode: FieldMode,
    handlers: &FieldHandlers,
) -> Html {
    let key = FieldKey::of(group, field);
    let id = input_id(&key);
    let control = match mode {
        FieldMode::ReadOnly => read_only_value(field, value),
        FieldMode::Edit => editable_control(&id, key, field, value, handlers),
    };

    html! {
        <div class={classes!("form-field", (!error.is_empty()).then_some("has-error"))}>
            <label for={id}>
                { field.field_label.clone() }
                { if field.is_required { html! { <span class="required">{" *"}</span> } } else { html! {} } }
            </label>
            { control }
            { if error.is_empty() { html! {} } else { html! { <div class="field-error">{ error.to_string() }</div> } } }
        </div>
    }
}

fn read_only_value(field: &FieldDefinition, value: &FieldValue) -> Html {
    if let FieldType::Unsupported(name) = &field.field_type {
        return html! { <div class="field-unsupported">{ unsupported_message(name) }</div> };
    }
    let text = control_value(&field.field_type, value);
    html! { <div class="field-value">{ if text.is_empty() { "-".to_string() } else { text } }</div> }
}

fn editable_control(
    id: &str,
    key: FieldKey,
    field: &FieldDefinition,
    value: &FieldValue,
    handlers: &FieldHandlers,
) -> Html {
    let current = control_value(&field.field_type, value);
    let on_value = handlers.on_value.clone();

    match control_kind(&field.field_type) {
        ControlKind::Input(input_type) => {
            let oninput = Callback::from(move |e: InputEvent| {
                let raw = e.target_unchecked_into::<HtmlInputElement>().value();
                on_value.emit((key.clone(), FieldValue::Text(raw)));
            });
            html! {
                <input id={id.to_string()} type={input_type} value={current} {oninput} />
            }
        }
        ControlKind::Textarea => {
            let oninput = Callback::from(move |e: InputEvent| {
                let raw = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                on_value.emit((key.clone(), FieldValue::Text(raw)));
            });
            html! {
                <textarea id={id.to_string()} rows="4" value={current} {oninput} />
            }
        }
        ControlKind::Select => {
            let onchange = Callback::from(move |e: Event| {
                let raw = e.target_unchecked_into::<HtmlSelectElement>().value();
                on_value.emit((key.clone(), FieldValue::Text(raw)));
            });
            html! {
                <select id={id.to_string()} {onchange}>
                    { for select_choices(field, &current).into_iter().map(|choice| html! {
                        <option value={choice.value} selected={choice.selected} disabled={choice.disabled}>
                            { choice.label }
                        </option>
                    }) }
                </select>
            }
        }
        ControlKind::File => {
            let on_file = handlers.on_file.clone();
            let onchange = Callback::from(move |e: Event| {
                let input = e.target_unchecked_into::<HtmlInputElement>();
                let file = input.files().and_then(|files| files.get(0));
                let name = file.as_ref().map(|f| f.name()).unwrap_or_default();
                on_file.emit((key.clone(), file));
                on_value.emit((key.clone(), FieldValue::Text(name)));
            });
            html! {
                <div class="file-control">
                    <input id={id.to_string()} type="file" {onchange} />
                    { if current.is_empty() { html! {} } else { html! { <span class="file-name">{ current }</span> } } }
                </div>
            }
        }
        ControlKind::Unsupported(name) => html! {
            <div class="field-unsupported">{ unsupported_message(name) }</div>
        },
    }
}

/// Every group of `schema` as a fieldset, in schema order.
pub fn schema_form(
    schema: &TemplateSchema,
    bag: &ValueBag,
    errors: &FieldErrors,
    mode: FieldMode,
    handlers: &FieldHandlers,
) -> Html {
    if schema.has_no_fields() {
        return html! { <p class="empty-schema">{"This template has no fields yet."}</p> };
    }
    html! {
        <div class="schema-form">
            { for schema.groups.iter().map(|group| html! {
                <fieldset class="field-group">
                    <legend>{ group.group_name.clone() }</legend>
                    { for group.fields.iter().map(|field| {
                        let key = FieldKey::of(group, field);
                        let value = bag.value_or_empty(&group.group_name, &field.key());
                        field_input(group, field, &value, errors.error(&key), mode, handlers)
                    }) }
                </fieldset>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_value_is_cut_at_time_part() {
        let stored = FieldValue::from("2024-03-05T00:00:00.000Z");
        assert_eq!(control_value(&FieldType::Date, &stored), "2024-03-05");
        assert_eq!(control_value(&FieldType::Text, &stored), "2024-03-05T00:00:00.000Z");
    }

    #[test]
    fn null_and_numbers_render_as_input_text() {
        assert_eq!(control_value(&FieldType::Number, &FieldValue::Null), "");
        assert_eq!(control_value(&FieldType::Number, &FieldValue::Number(12.0)), "12");
    }

    #[test]
    fn placeholder_and_unsupported_texts() {
        assert_eq!(select_placeholder("Ward"), "Select Ward");
        assert_eq!(unsupported_message("signature"), "Unsupported type: signature");
    }

    fn ward_select() -> FieldDefinition {
        let mut field = FieldDefinition::new("Ward", FieldType::Select);
        field.options = vec!["ICU".into(), "ER".into()];
        field
    }

    #[test]
    fn empty_select_value_selects_the_placeholder() {
        let choices = select_choices(&ward_select(), "");
        assert_eq!(choices.len(), 3);
        assert_eq!(
            choices[0],
            SelectChoice {
                value: String::new(),
                label: "Select Ward".into(),
                selected: true,
                disabled: true,
            }
        );
        assert!(choices[1..].iter().all(|c| !c.selected && !c.disabled));
    }

    #[test]
    fn stored_select_value_selects_its_option() {
        let choices = select_choices(&ward_select(), "ER");
        let selected: Vec<_> = choices.iter().filter(|c| c.selected).map(|c| c.value.as_str()).collect();
        assert_eq!(selected, ["ER"]);
    }

    #[test]
    fn every_field_type_maps_to_a_control() {
        assert_eq!(control_kind(&FieldType::Date), ControlKind::Input("date"));
        assert_eq!(control_kind(&FieldType::Number), ControlKind::Input("number"));
        assert_eq!(control_kind(&FieldType::Select), ControlKind::Select);
        assert_eq!(
            control_kind(&FieldType::Unsupported("signature".into())),
            ControlKind::Unsupported("signature")
        );
    }

    #[test]
    fn input_ids_have_no_whitespace() {
        assert_eq!(
            input_id(&FieldKey::new("Patient info", "full_name")),
            "field-Patient-info-full_name"
        );
    }
}

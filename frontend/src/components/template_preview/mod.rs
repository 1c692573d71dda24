//! Fill-in preview of a schema that never talks to the backend.

use common::model::field::FieldValue;
use common::model::schema::TemplateSchema;
use common::model::value_bag::ValueBag;
use common::validation::{validate_bag, validate_key, FieldErrors, FieldKey};
use yew::prelude::*;

use crate::components::field_input::{schema_form, FieldHandlers, FieldMode};
use crate::helpers::markdown_view;

pub enum Msg {
    SetValue(FieldKey, FieldValue),
    Validate,
    Reset,
}

#[derive(Properties, PartialEq, Clone)]
pub struct TemplatePreviewProps {
    pub schema: TemplateSchema,
    #[prop_or_default]
    pub name: String,
    #[prop_or_default]
    pub description: String,
}

pub struct TemplatePreview {
    bag: ValueBag,
    errors: FieldErrors,
    /// Outcome line of the last "Validate" click.
    verdict: Option<String>,
}

impl TemplatePreview {
    fn seeded(schema: &TemplateSchema) -> Self {
        Self {
            bag: ValueBag::seed(schema),
            errors: FieldErrors::default(),
            verdict: None,
        }
    }
}

impl Component for TemplatePreview {
    type Message = Msg;
    type Properties = TemplatePreviewProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::seeded(&ctx.props().schema)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().schema != old_props.schema {
            // Keep what was typed for fields that still exist.
            self.bag.fill_missing(&ctx.props().schema);
            self.errors.clear();
            self.verdict = None;
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let schema = &ctx.props().schema;
        match msg {
            Msg::SetValue(key, value) => {
                let message = validate_key(schema, &key, Some(&value));
                self.bag.set(&key.group, &key.field, value);
                self.errors.set(key, message);
                true
            }
            Msg::Validate => {
                self.errors = validate_bag(schema, &self.bag);
                self.verdict = Some(if self.errors.has_errors() {
                    format!("{} field(s) need attention", self.errors.len())
                } else {
                    "All fields are valid".to_string()
                });
                true
            }
            Msg::Reset => {
                *self = Self::seeded(schema);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();
        let handlers = FieldHandlers {
            on_value: link.callback(|(key, value)| Msg::SetValue(key, value)),
            on_file: Callback::noop(),
        };

        html! {
            <div class="template-preview">
                { if props.name.is_empty() { html! {} } else { html! { <h3>{ props.name.clone() }</h3> } } }
                <div class="template-description">{ markdown_view(&props.description) }</div>
                { schema_form(&props.schema, &self.bag, &self.errors, FieldMode::Edit, &handlers) }
                <div class="preview-actions">
                    <button class="btn" onclick={link.callback(|_| Msg::Validate)}>{"Validate"}</button>
                    <button class="btn btn-secondary" onclick={link.callback(|_| Msg::Reset)}>{"Reset"}</button>
                    { match &self.verdict {
                        Some(text) => html! { <span class="preview-verdict">{ text.clone() }</span> },
                        None => html! {},
                    } }
                </div>
            </div>
        }
    }
}

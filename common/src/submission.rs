//! Turns a value bag into the request body of a logbook entry.
//!
//! The bag is validated in full first; nothing is built while any field fails.
//! Groups that declare a `sequence` get it copied into their values as
//! `_sequence`, which the backend has always received alongside the real
//! field values.

use crate::model::entry::EntryStatus;
use crate::model::field::FieldValue;
use crate::model::schema::TemplateSchema;
use crate::model::value_bag::ValueBag;
use crate::requests::EntryPayload;
use crate::validation::{validate_bag, FieldErrors};
use thiserror::Error;

/// Reserved key carrying a group's declared sequence inside submitted values.
pub const SEQUENCE_KEY: &str = "_sequence";

/// Who the entry belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionContext {
    pub template_id: String,
    pub student_id: String,
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOptions {
    /// Copy each group's declared sequence into its values as `_sequence`.
    pub embed_group_sequence: bool,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            embed_group_sequence: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("This template has no fields to fill in")]
    EmptySchema,
    #[error("Please fix the {} highlighted field(s) before saving", .0.len())]
    Invalid(FieldErrors),
}

/// The values as sent to the backend, `_sequence` included when enabled.
pub fn payload_fields(
    schema: &TemplateSchema,
    bag: &ValueBag,
    options: SubmissionOptions,
) -> ValueBag {
    let mut fields = bag.clone();
    if options.embed_group_sequence {
        for group in &schema.groups {
            if let Some(sequence) = group.sequence {
                fields.set(
                    &group.group_name,
                    SEQUENCE_KEY,
                    FieldValue::Number(sequence as f64),
                );
            }
        }
    }
    fields
}

/// Validates `bag` against `schema` and assembles the entry request body.
pub fn build_entry_payload(
    ctx: &SubmissionContext,
    schema: &TemplateSchema,
    bag: &ValueBag,
    remarks: &str,
    status: EntryStatus,
    options: SubmissionOptions,
) -> Result<EntryPayload, SubmitError> {
    if schema.has_no_fields() {
        return Err(SubmitError::EmptySchema);
    }

    let errors = validate_bag(schema, bag);
    if errors.has_errors() {
        return Err(SubmitError::Invalid(errors));
    }

    Ok(EntryPayload {
        log_book_template_id: ctx.template_id.clone(),
        student_id: ctx.student_id.clone(),
        teacher_id: ctx.teacher_id.clone(),
        student_remarks: remarks.to_string(),
        dynamic_fields: payload_fields(schema, bag, options),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldDefinition, FieldType};
    use crate::model::schema::FieldGroup;
    use crate::validation::FieldKey;

    fn ctx() -> SubmissionContext {
        SubmissionContext {
            template_id: "t-1".into(),
            student_id: "s-1".into(),
            teacher_id: Some("teacher-1".into()),
        }
    }

    fn schema_with_sequence() -> TemplateSchema {
        let mut group = FieldGroup::new("Info")
            .with_field(FieldDefinition::new("Ward", FieldType::Text));
        group.sequence = Some(2);
        TemplateSchema::new(vec![group, FieldGroup::new("Notes")
            .with_field(FieldDefinition::new("Comment", FieldType::Textarea))])
    }

    #[test]
    fn sequence_is_embedded_only_for_declaring_groups() {
        let schema = schema_with_sequence();
        let bag = ValueBag::seed(&schema);
        let payload = build_entry_payload(
            &ctx(),
            &schema,
            &bag,
            "",
            EntryStatus::Draft,
            SubmissionOptions::default(),
        )
        .unwrap();

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["dynamicFields"]["Info"]["_sequence"], 2);
        assert!(json["dynamicFields"]["Notes"].get("_sequence").is_none());
        assert_eq!(json["logBookTemplateId"], "t-1");
        assert_eq!(json["teacherId"], "teacher-1");
        assert_eq!(json["status"], "DRAFT");
    }

    #[test]
    fn sequence_can_be_left_out() {
        let schema = schema_with_sequence();
        let bag = ValueBag::seed(&schema);
        let fields = payload_fields(
            &schema,
            &bag,
            SubmissionOptions {
                embed_group_sequence: false,
            },
        );
        assert_eq!(fields, bag);
    }

    #[test]
    fn empty_schema_is_refused() {
        let schema = TemplateSchema::new(vec![FieldGroup::new("Empty")]);
        let result = build_entry_payload(
            &ctx(),
            &schema,
            &ValueBag::default(),
            "",
            EntryStatus::Submitted,
            SubmissionOptions::default(),
        );
        assert_eq!(result, Err(SubmitError::EmptySchema));
    }

    #[test]
    fn invalid_bag_returns_every_error() {
        let mut a = FieldDefinition::new("A", FieldType::Text);
        a.is_required = true;
        let mut b = FieldDefinition::new("B", FieldType::Number);
        b.validation_regex = Some(r"^\d+$".into());
        let schema = TemplateSchema::new(vec![FieldGroup::new("G").with_field(a).with_field(b)]);
        let mut bag = ValueBag::seed(&schema);
        bag.set("G", "b", "x1".into());

        let Err(SubmitError::Invalid(errors)) = build_entry_payload(
            &ctx(),
            &schema,
            &bag,
            "",
            EntryStatus::Submitted,
            SubmissionOptions::default(),
        ) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.error(&FieldKey::new("G", "b")), "B format is invalid");
    }
}

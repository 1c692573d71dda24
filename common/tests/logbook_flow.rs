//! End-to-end flows through the shared logbook logic: a template authored
//! with the builder, a student filling it in, and the payload that would be
//! sent to the backend.

use common::builder::{add_field, add_group, update_field, update_group_name, FieldPatch};
use common::entries::{EntryDraft, EntryList, RowId};
use common::model::entry::{EntryStatus, LogbookEntry};
use common::model::field::{FieldDefinition, FieldType, FieldValue};
use common::model::schema::{FieldGroup, TemplateSchema};
use common::model::template::Template;
use common::model::value_bag::ValueBag;
use common::submission::{SubmissionContext, SubmissionOptions, SubmitError};
use common::validation::{validate_bag, FieldKey};
use serde_json::json;

fn full_name_schema() -> TemplateSchema {
    let mut name = FieldDefinition::new("Full Name", FieldType::Text);
    name.is_required = true;
    TemplateSchema::new(vec![FieldGroup::new("Info").with_field(name)])
}

fn student() -> SubmissionContext {
    SubmissionContext {
        template_id: "tpl-1".into(),
        student_id: "stu-1".into(),
        teacher_id: Some("tch-1".into()),
    }
}

#[test]
fn typing_a_name_clears_the_error_and_submits() {
    let schema = full_name_schema();
    let mut draft = EntryDraft::new(&schema, student());
    assert_eq!(serde_json::to_value(&draft.bag).unwrap(), json!({"Info": {"full_name": ""}}));

    let key = FieldKey::new("Info", "full_name");
    draft.set_value(&schema, &key, "Ann".into());
    assert_eq!(serde_json::to_value(&draft.bag).unwrap(), json!({"Info": {"full_name": "Ann"}}));
    assert_eq!(draft.errors.error(&key), "");

    let payload = draft
        .to_payload(&schema, EntryStatus::Submitted, SubmissionOptions::default())
        .expect("valid entry");
    let body = serde_json::to_value(&payload).unwrap();
    assert_eq!(body["dynamicFields"]["Info"]["full_name"], "Ann");
    assert_eq!(body["studentId"], "stu-1");
    assert_eq!(body["status"], "SUBMITTED");
}

#[test]
fn submitting_untouched_form_is_blocked() {
    let schema = full_name_schema();
    let mut draft = EntryDraft::new(&schema, student());
    let result = draft.to_payload(&schema, EntryStatus::Submitted, SubmissionOptions::default());

    let Err(SubmitError::Invalid(errors)) = result else {
        panic!("an empty required field must block submission");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.error(&FieldKey::new("Info", "full_name")), "Full Name is required");
}

#[test]
fn select_without_default_starts_empty() {
    let mut schema = TemplateSchema::default();
    add_group(&mut schema);
    add_field(&mut schema, 0);
    update_field(&mut schema, 0, 0, FieldPatch::label("Grade"));
    update_field(&mut schema, 0, 0, FieldPatch::field_type(FieldType::Select));
    update_field(&mut schema, 0, 0, FieldPatch::options(vec!["A".into(), "B".into()]));

    let bag = ValueBag::seed(&schema);
    assert_eq!(bag.get("Group 1", "grade"), Some(&FieldValue::empty()));
}

#[test]
fn seeded_bag_has_one_key_per_field() {
    let mut schema = TemplateSchema::default();
    add_group(&mut schema);
    add_group(&mut schema);
    update_group_name(&mut schema, 1, "Procedure Log");
    for (group, label) in [(0, "Patient Name"), (0, "Bed  No"), (1, "Procedure"), (1, "Outcome Notes")] {
        add_field(&mut schema, group);
        let index = schema.groups[group].fields.len() - 1;
        update_field(&mut schema, group, index, FieldPatch::label(label));
    }

    let bag = ValueBag::seed(&schema);
    assert_eq!(bag.len(), schema.field_count());
    assert_eq!(
        serde_json::to_value(&bag).unwrap(),
        json!({
            "Group 1": {"patient_name": "", "bed_no": ""},
            "Procedure Log": {"procedure": "", "outcome_notes": ""}
        })
    );
}

#[test]
fn stored_entry_round_trips_through_the_editor() {
    let template: Template = serde_json::from_value(json!({
        "id": "tpl-1",
        "name": "Ward rounds",
        "templateType": "subject",
        "dynamicSchema": [
            {"groupName": "Info", "sequence": 1, "fields": [
                {"fieldName": "full_name", "fieldLabel": "Full Name", "fieldType": "text", "isRequired": true},
                {"fieldName": "hours", "fieldLabel": "Hours", "fieldType": "number", "validationRegex": "^\\d+$"}
            ]}
        ]
    }))
    .unwrap();
    let entry: LogbookEntry = serde_json::from_value(json!({
        "id": "ent-1",
        "studentId": "stu-1",
        "logBookTemplateId": "tpl-1",
        "status": "DRAFT",
        "dynamicFields": {"Info": {"full_name": "Ann", "_sequence": 1}}
    }))
    .unwrap();

    let schema = &template.dynamic_schema;
    let mut list = EntryList::from_server(vec![entry]);
    assert!(list.begin_edit("ent-1", schema));

    let id = RowId::Server("ent-1".into());
    let draft = list.draft_mut(&id).unwrap();
    assert_eq!(draft.bag.get("Info", "hours"), Some(&FieldValue::empty()));

    draft.set_value(schema, &FieldKey::new("Info", "hours"), "six".into());
    assert_eq!(draft.errors.error(&FieldKey::new("Info", "hours")), "Hours format is invalid");
    draft.set_value(schema, &FieldKey::new("Info", "hours"), "6".into());
    assert!(validate_bag(schema, &draft.bag).is_empty());

    let payload = draft
        .to_payload(schema, EntryStatus::Submitted, SubmissionOptions::default())
        .unwrap();
    let body = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        body["dynamicFields"],
        json!({"Info": {"full_name": "Ann", "hours": "6", "_sequence": 1}})
    );
}

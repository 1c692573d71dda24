//! Client-side list of logbook entries.
//!
//! Rows created in the browser stay `Pending` until the backend confirms them
//! with a real record, so nothing that only exists locally is ever treated as
//! persisted.

use crate::model::entry::{EntryStatus, LogbookEntry};
use crate::model::field::FieldValue;
use crate::model::schema::TemplateSchema;
use crate::model::value_bag::ValueBag;
use crate::requests::EntryPayload;
use crate::submission::{build_entry_payload, SubmissionContext, SubmissionOptions, SubmitError};
use crate::validation::{validate_key, FieldErrors, FieldKey};
use uuid::Uuid;

/// Editable state of one entry: its values, remarks and live errors.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub context: SubmissionContext,
    pub bag: ValueBag,
    pub remarks: String,
    pub errors: FieldErrors,
}

impl EntryDraft {
    pub fn new(schema: &TemplateSchema, context: SubmissionContext) -> Self {
        Self {
            context,
            bag: ValueBag::seed(schema),
            remarks: String::new(),
            errors: FieldErrors::default(),
        }
    }

    /// Opens a saved entry for editing, seeding fields added to the schema since.
    pub fn from_entry(entry: &LogbookEntry, schema: &TemplateSchema) -> Self {
        let mut bag = entry.dynamic_fields.clone();
        bag.fill_missing(schema);
        Self {
            context: SubmissionContext {
                template_id: entry.log_book_template_id.clone(),
                student_id: entry.student_id.clone(),
                teacher_id: entry.teacher_id.clone(),
            },
            bag,
            remarks: entry.student_remarks.clone().unwrap_or_default(),
            errors: FieldErrors::default(),
        }
    }

    /// Stores a new value and re-validates just that field.
    pub fn set_value(&mut self, schema: &TemplateSchema, key: &FieldKey, value: FieldValue) {
        let message = validate_key(schema, key, Some(&value));
        self.bag.set(&key.group, &key.field, value);
        self.errors.set(key.clone(), message);
    }

    /// Builds the request body, keeping the full error set on failure.
    pub fn to_payload(
        &mut self,
        schema: &TemplateSchema,
        status: EntryStatus,
        options: SubmissionOptions,
    ) -> Result<EntryPayload, SubmitError> {
        let result = build_entry_payload(
            &self.context,
            schema,
            &self.bag,
            &self.remarks,
            status,
            options,
        );
        match &result {
            Ok(_) => self.errors.clear(),
            Err(SubmitError::Invalid(errors)) => self.errors = errors.clone(),
            Err(SubmitError::EmptySchema) => {}
        }
        result
    }
}

/// Identity of a row: a browser-generated id or the backend's id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowId {
    Local(String),
    Server(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryRow {
    /// Created locally, not yet acknowledged by the backend.
    Pending { local_id: String, draft: EntryDraft },
    /// A backend record, optionally open for editing.
    Persisted {
        entry: LogbookEntry,
        editing: Option<EntryDraft>,
    },
}

impl EntryRow {
    pub fn id(&self) -> RowId {
        match self {
            EntryRow::Pending { local_id, .. } => RowId::Local(local_id.clone()),
            EntryRow::Persisted { entry, .. } => RowId::Server(entry.id.clone()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EntryRow::Pending { .. })
    }

    pub fn draft(&self) -> Option<&EntryDraft> {
        match self {
            EntryRow::Pending { draft, .. } => Some(draft),
            EntryRow::Persisted { editing, .. } => editing.as_ref(),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut EntryDraft> {
        match self {
            EntryRow::Pending { draft, .. } => Some(draft),
            EntryRow::Persisted { editing, .. } => editing.as_mut(),
        }
    }

    pub fn persisted(&self) -> Option<&LogbookEntry> {
        match self {
            EntryRow::Persisted { entry, .. } => Some(entry),
            EntryRow::Pending { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryList {
    rows: Vec<EntryRow>,
}

impl EntryList {
    pub fn from_server(entries: Vec<LogbookEntry>) -> Self {
        Self {
            rows: entries
                .into_iter()
                .map(|entry| EntryRow::Persisted {
                    entry,
                    editing: None,
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &RowId) -> Option<&EntryRow> {
        self.rows.iter().find(|row| &row.id() == id)
    }

    /// Appends a pending row to the list and returns its id. Confirming it
    /// later keeps it in place.
    pub fn begin_new(&mut self, draft: EntryDraft) -> RowId {
        let local_id = format!("temp-{}", Uuid::new_v4().simple());
        self.rows.push(EntryRow::Pending {
            local_id: local_id.clone(),
            draft,
        });
        RowId::Local(local_id)
    }

    /// Opens a persisted entry for editing. Returns false when the entry is
    /// unknown or its status no longer allows edits.
    pub fn begin_edit(&mut self, server_id: &str, schema: &TemplateSchema) -> bool {
        for row in &mut self.rows {
            if let EntryRow::Persisted { entry, editing } = row {
                if entry.id == server_id && entry.status.is_editable() {
                    *editing = Some(EntryDraft::from_entry(entry, schema));
                    return true;
                }
            }
        }
        false
    }

    /// Drops a pending row, or closes the editor of a persisted one.
    pub fn cancel(&mut self, id: &RowId) {
        match id {
            RowId::Local(_) => self.rows.retain(|row| &row.id() != id),
            RowId::Server(_) => {
                if let Some(EntryRow::Persisted { editing, .. }) = self.row_mut(id) {
                    *editing = None;
                }
            }
        }
    }

    pub fn draft_mut(&mut self, id: &RowId) -> Option<&mut EntryDraft> {
        self.row_mut(id).and_then(EntryRow::draft_mut)
    }

    /// Replaces the pending row `local_id` with the record the backend returned.
    pub fn confirm_new(&mut self, local_id: &str, entry: LogbookEntry) -> bool {
        let target = RowId::Local(local_id.to_string());
        match self.row_mut(&target) {
            Some(row) => {
                *row = EntryRow::Persisted {
                    entry,
                    editing: None,
                };
                true
            }
            None => false,
        }
    }

    /// Swaps in the backend's copy of an edited entry, closing its editor.
    pub fn replace_persisted(&mut self, entry: LogbookEntry) -> bool {
        let target = RowId::Server(entry.id.clone());
        match self.row_mut(&target) {
            Some(row) => {
                *row = EntryRow::Persisted {
                    entry,
                    editing: None,
                };
                true
            }
            None => false,
        }
    }

    pub fn persisted(&self) -> impl Iterator<Item = &LogbookEntry> {
        self.rows.iter().filter_map(EntryRow::persisted)
    }

    fn row_mut(&mut self, id: &RowId) -> Option<&mut EntryRow> {
        self.rows.iter_mut().find(|row| &row.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldDefinition, FieldType};
    use crate::model::schema::FieldGroup;

    fn schema() -> TemplateSchema {
        let mut name = FieldDefinition::new("Full Name", FieldType::Text);
        name.is_required = true;
        TemplateSchema::new(vec![FieldGroup::new("Info").with_field(name)])
    }

    fn context() -> SubmissionContext {
        SubmissionContext {
            template_id: "t-1".into(),
            student_id: "s-1".into(),
            teacher_id: None,
        }
    }

    fn stored(id: &str, status: EntryStatus) -> LogbookEntry {
        let mut bag = ValueBag::default();
        bag.set("Info", "full_name", "Ann".into());
        LogbookEntry {
            id: id.into(),
            student_id: "s-1".into(),
            teacher_id: None,
            log_book_template_id: "t-1".into(),
            status,
            dynamic_fields: bag,
            student_remarks: Some("first week".into()),
            teacher_remarks: None,
            template: None,
        }
    }

    #[test]
    fn set_value_updates_bag_and_live_error() {
        let schema = schema();
        let mut draft = EntryDraft::new(&schema, context());
        let key = FieldKey::new("Info", "full_name");

        draft.set_value(&schema, &key, "".into());
        assert_eq!(draft.errors.error(&key), "Full Name is required");

        draft.set_value(&schema, &key, "Ann".into());
        assert_eq!(draft.errors.error(&key), "");
        assert_eq!(draft.bag.get("Info", "full_name"), Some(&FieldValue::from("Ann")));
    }

    #[test]
    fn live_error_covers_every_field_of_a_duplicated_group() {
        let mut required = FieldDefinition::new("Notes", FieldType::Text);
        required.is_required = true;
        let schema = TemplateSchema::new(vec![
            FieldGroup::new("Day").with_field(required),
            FieldGroup::new("Day").with_field(FieldDefinition::new("Notes", FieldType::Textarea)),
        ]);
        let mut draft = EntryDraft::new(&schema, context());
        let key = FieldKey::new("Day", "notes");

        draft.set_value(&schema, &key, "".into());
        assert_eq!(draft.errors.error(&key), "Notes is required");
    }

    #[test]
    fn failed_payload_keeps_errors_on_draft() {
        let schema = schema();
        let mut draft = EntryDraft::new(&schema, context());
        let result = draft.to_payload(&schema, EntryStatus::Submitted, SubmissionOptions::default());
        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert_eq!(
            draft.errors.error(&FieldKey::new("Info", "full_name")),
            "Full Name is required"
        );
    }

    #[test]
    fn pending_row_is_replaced_on_confirmation() {
        let schema = schema();
        let mut list = EntryList::from_server(vec![stored("e-1", EntryStatus::Submitted)]);
        let RowId::Local(local_id) = list.begin_new(EntryDraft::new(&schema, context())) else {
            panic!("new rows are local");
        };

        assert_eq!(list.len(), 2);
        assert!(!list.rows()[0].is_pending());
        assert!(list.rows()[1].is_pending());
        assert_eq!(list.persisted().count(), 1);

        assert!(list.confirm_new(&local_id, stored("e-2", EntryStatus::Draft)));
        assert_eq!(list.persisted().count(), 2);
        assert_eq!(list.rows()[1].id(), RowId::Server("e-2".into()));
        assert!(list.get(&RowId::Local(local_id.clone())).is_none());
        assert!(!list.confirm_new(&local_id, stored("e-3", EntryStatus::Draft)));
    }

    #[test]
    fn editing_respects_status() {
        let schema = schema();
        let mut list = EntryList::from_server(vec![
            stored("draft", EntryStatus::Draft),
            stored("approved", EntryStatus::Approved),
        ]);
        assert!(list.begin_edit("draft", &schema));
        assert!(!list.begin_edit("approved", &schema));
        assert!(!list.begin_edit("missing", &schema));

        let id = RowId::Server("draft".into());
        let draft = list.draft_mut(&id).unwrap();
        assert_eq!(draft.remarks, "first week");
        assert_eq!(draft.bag.get("Info", "full_name"), Some(&FieldValue::from("Ann")));

        list.cancel(&id);
        assert!(list.get(&id).unwrap().draft().is_none());
    }

    #[test]
    fn replace_persisted_closes_editor() {
        let schema = schema();
        let mut list = EntryList::from_server(vec![stored("e-1", EntryStatus::Draft)]);
        list.begin_edit("e-1", &schema);
        assert!(list.replace_persisted(stored("e-1", EntryStatus::Submitted)));

        let row = list.get(&RowId::Server("e-1".into())).unwrap();
        assert!(row.draft().is_none());
        assert_eq!(row.persisted().unwrap().status, EntryStatus::Submitted);
    }

    #[test]
    fn cancel_drops_pending_rows() {
        let schema = schema();
        let mut list = EntryList::default();
        let id = list.begin_new(EntryDraft::new(&schema, context()));
        list.cancel(&id);
        assert!(list.is_empty());
    }
}

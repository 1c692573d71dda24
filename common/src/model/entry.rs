use crate::model::template::Template;
use crate::model::value_bag::ValueBag;
use serde::{Deserialize, Serialize};

/// Lifecycle of a logbook entry. Changes only through an explicit user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Draft => "Draft",
            EntryStatus::Submitted => "Submitted",
            EntryStatus::Approved => "Approved",
            EntryStatus::Rejected => "Rejected",
        }
    }

    /// Students save drafts and submit; teachers approve or reject what was
    /// submitted; a rejected entry can be reopened as a draft.
    pub fn can_transition_to(&self, next: EntryStatus) -> bool {
        use EntryStatus::*;
        matches!(
            (self, next),
            (Draft, Draft)
                | (Draft, Submitted)
                | (Submitted, Submitted)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (Rejected, Draft)
                | (Rejected, Submitted)
        )
    }

    /// Whether the student may still change the entry's values.
    pub fn is_editable(&self) -> bool {
        matches!(self, EntryStatus::Draft | EntryStatus::Rejected)
    }
}

/// A logbook entry as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookEntry {
    pub id: String,
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    pub log_book_template_id: String,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(default)]
    pub dynamic_fields: ValueBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_remarks: Option<String>,
    /// Filled in when the list was requested with `includeTemplate=true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

use crate::model::entry::EntryStatus;
use crate::model::value_bag::ValueBag;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/log-books` and `PUT /api/log-books/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    pub log_book_template_id: String,
    pub student_id: String,
    pub teacher_id: Option<String>,
    pub student_remarks: String,
    pub dynamic_fields: ValueBag,
    pub status: EntryStatus,
}

/// Teacher decision sent with `PUT /api/log-books/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub status: EntryStatus,
    pub teacher_id: String,
    pub teacher_remarks: String,
}

/// Query of `GET /api/log-books`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryQuery {
    pub student_id: String,
    pub log_book_template_id: Option<String>,
    pub include_template: bool,
}

impl EntryQuery {
    pub fn for_student(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            ..Self::default()
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("studentId", self.student_id.clone())];
        if let Some(template_id) = &self.log_book_template_id {
            pairs.push(("logBookTemplateId", template_id.clone()));
        }
        if self.include_template {
            pairs.push(("includeTemplate", "true".to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_query_lists_only_requested_members() {
        let query = EntryQuery {
            student_id: "s-9".into(),
            log_book_template_id: Some("t-2".into()),
            include_template: true,
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("studentId", "s-9".to_string()),
                ("logBookTemplateId", "t-2".to_string()),
                ("includeTemplate", "true".to_string()),
            ]
        );
        assert_eq!(EntryQuery::for_student("s-1").query_pairs().len(), 1);
    }

    #[test]
    fn review_update_wire_shape() {
        let update = ReviewUpdate {
            status: EntryStatus::Approved,
            teacher_id: "t-7".into(),
            teacher_remarks: "Well documented".into(),
        };
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(json["status"], "APPROVED");
        assert_eq!(json["teacherRemarks"], "Well documented");
    }
}

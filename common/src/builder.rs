//! Editing operations over a [`TemplateSchema`] owned by the caller.
//!
//! Every operation takes positional indices as rendered from the current
//! schema. An index that does not exist is ignored, so a stale click can never
//! corrupt or panic the editor.

use crate::model::field::{derive_key, FieldDefinition, FieldType, FieldValue};
use crate::model::schema::{FieldGroup, TemplateSchema};
use crate::validation::check_pattern;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Appends a new, empty group named after its position.
pub fn add_group(schema: &mut TemplateSchema) {
    let position = schema.groups.len() + 1;
    let mut group = FieldGroup::new(format!("Group {}", position));
    group.sequence = Some(position as i64);
    schema.groups.push(group);
}

pub fn remove_group(schema: &mut TemplateSchema, index: usize) {
    if index < schema.groups.len() {
        schema.groups.remove(index);
    }
}

/// Renames a group. Values already captured under the old name are untouched.
pub fn update_group_name(schema: &mut TemplateSchema, index: usize, name: impl Into<String>) {
    if let Some(group) = schema.groups.get_mut(index) {
        group.group_name = name.into();
    }
}

pub fn move_group_up(schema: &mut TemplateSchema, index: usize) {
    if index > 0 && index < schema.groups.len() {
        schema.groups.swap(index - 1, index);
    }
}

pub fn move_group_down(schema: &mut TemplateSchema, index: usize) {
    if index + 1 < schema.groups.len() {
        schema.groups.swap(index, index + 1);
    }
}

/// Appends an optional text field with a unique synthetic name.
pub fn add_field(schema: &mut TemplateSchema, group_index: usize) {
    if let Some(group) = schema.groups.get_mut(group_index) {
        let position = group.fields.len() + 1;
        group.fields.push(FieldDefinition {
            field_name: format!("field_{}", Uuid::new_v4().simple()),
            field_label: format!("Field {}", position),
            field_type: FieldType::Text,
            is_required: false,
            options: Vec::new(),
            default_value: None,
            validation_regex: None,
        });
    }
}

pub fn remove_field(schema: &mut TemplateSchema, group_index: usize, field_index: usize) {
    if let Some(group) = schema.groups.get_mut(group_index) {
        if field_index < group.fields.len() {
            group.fields.remove(field_index);
        }
    }
}

/// Partial update of a field. `None` members leave the field as it is.
///
/// `default_value` and `validation_regex` are doubly optional so a patch can
/// clear them: `Some(None)` removes the setting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldPatch {
    pub field_name: Option<String>,
    pub field_label: Option<String>,
    pub field_type: Option<FieldType>,
    pub is_required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub default_value: Option<Option<FieldValue>>,
    pub validation_regex: Option<Option<String>>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            field_label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    pub fn required(is_required: bool) -> Self {
        Self {
            is_required: Some(is_required),
            ..Self::default()
        }
    }

    pub fn options(options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            ..Self::default()
        }
    }

    pub fn default_value(value: Option<FieldValue>) -> Self {
        Self {
            default_value: Some(value),
            ..Self::default()
        }
    }

    pub fn validation_regex(pattern: Option<String>) -> Self {
        Self {
            validation_regex: Some(pattern),
            ..Self::default()
        }
    }
}

/// Merges `patch` into the field. A new label without an explicit name also
/// renames the field after the label.
pub fn update_field(
    schema: &mut TemplateSchema,
    group_index: usize,
    field_index: usize,
    patch: FieldPatch,
) {
    let Some(field) = schema
        .groups
        .get_mut(group_index)
        .and_then(|group| group.fields.get_mut(field_index))
    else {
        return;
    };

    if let Some(label) = patch.field_label {
        if patch.field_name.is_none() {
            field.field_name = derive_key(&label);
        }
        field.field_label = label;
    }
    if let Some(name) = patch.field_name {
        field.field_name = name;
    }
    if let Some(field_type) = patch.field_type {
        field.field_type = field_type;
    }
    if let Some(is_required) = patch.is_required {
        field.is_required = is_required;
    }
    if let Some(options) = patch.options {
        field.options = options;
    }
    if let Some(default_value) = patch.default_value {
        field.default_value = default_value;
    }
    if let Some(pattern) = patch.validation_regex {
        field.validation_regex = pattern.filter(|p| !p.is_empty());
    }
}

/// Swaps the field with its predecessor. No-op for the first field.
pub fn move_field_up(schema: &mut TemplateSchema, group_index: usize, field_index: usize) {
    if let Some(group) = schema.groups.get_mut(group_index) {
        if field_index > 0 && field_index < group.fields.len() {
            group.fields.swap(field_index - 1, field_index);
        }
    }
}

/// Swaps the field with its successor. No-op for the last field.
pub fn move_field_down(schema: &mut TemplateSchema, group_index: usize, field_index: usize) {
    if let Some(group) = schema.groups.get_mut(group_index) {
        if field_index + 1 < group.fields.len() {
            group.fields.swap(field_index, field_index + 1);
        }
    }
}

/// Splits the comma separated option list typed into the builder.
pub fn parse_options(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}

/// A problem that keeps a schema from being saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaIssue {
    #[error("The template has no fields")]
    NoFields,
    #[error("Group {position} has no name")]
    UnnamedGroup { position: usize },
    #[error("A field in \"{group}\" has no label")]
    UnlabeledField { group: String },
    #[error("\"{group}\" has more than one field stored as \"{key}\"")]
    DuplicateKey { group: String, key: String },
    #[error("\"{label}\" is a dropdown without options")]
    SelectWithoutOptions { label: String },
    #[error("\"{label}\" has an invalid validation pattern: {reason}")]
    InvalidPattern { label: String, reason: String },
}

/// Lists everything wrong with `schema` from an author's point of view.
pub fn lint_schema(schema: &TemplateSchema) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();
    if schema.has_no_fields() {
        issues.push(SchemaIssue::NoFields);
    }

    for (index, group) in schema.groups.iter().enumerate() {
        if group.group_name.trim().is_empty() {
            issues.push(SchemaIssue::UnnamedGroup { position: index + 1 });
        }

        let mut seen = HashSet::new();
        for field in &group.fields {
            if field.field_label.trim().is_empty() {
                issues.push(SchemaIssue::UnlabeledField {
                    group: group.group_name.clone(),
                });
                continue;
            }
            let key = field.key();
            if !seen.insert(key.clone()) {
                issues.push(SchemaIssue::DuplicateKey {
                    group: group.group_name.clone(),
                    key,
                });
            }
            if field.field_type == FieldType::Select && field.options.is_empty() {
                issues.push(SchemaIssue::SelectWithoutOptions {
                    label: field.field_label.clone(),
                });
            }
            if let Some(pattern) = field.validation_pattern() {
                if let Err(err) = check_pattern(pattern) {
                    issues.push(SchemaIssue::InvalidPattern {
                        label: field.field_label.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    issues
}

use crate::model::field::FieldDefinition;
use crate::validation::FieldKey;
use serde::{Deserialize, Serialize};

/// A named section of a logbook form. The name is also the first key of the
/// value bag, so two groups sharing a name share one map of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    pub group_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Declared position of the group, echoed into submitted entries as `_sequence`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,
}

impl FieldGroup {
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            fields: Vec::new(),
            sequence: None,
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

/// The authoring artifact of a logbook template: groups of typed fields.
///
/// Stored by the backend as an opaque JSON array and interpreted entirely on
/// the client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSchema {
    pub groups: Vec<FieldGroup>,
}

impl TemplateSchema {
    pub fn new(groups: Vec<FieldGroup>) -> Self {
        Self { groups }
    }

    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }

    /// True when there is nothing to fill in, including a schema whose groups are all empty.
    pub fn has_no_fields(&self) -> bool {
        self.field_count() == 0
    }

    /// Every field paired with the group that declares it, in display order.
    pub fn fields(&self) -> impl Iterator<Item = (&FieldGroup, &FieldDefinition)> {
        self.groups
            .iter()
            .flat_map(|group| group.fields.iter().map(move |field| (group, field)))
    }

    /// Every field stored under `key`, in declaration order. Groups sharing a
    /// name collapse into one bag entry, so more than one field can match.
    pub fn fields_matching<'a>(
        &'a self,
        key: &'a FieldKey,
    ) -> impl Iterator<Item = &'a FieldDefinition> + 'a {
        self.groups
            .iter()
            .filter(move |group| group.group_name == key.group)
            .flat_map(move |group| group.fields.iter().filter(move |f| f.key() == key.field))
    }
}

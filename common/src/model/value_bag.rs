use crate::model::field::FieldValue;
use crate::model::schema::TemplateSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values of one logbook entry, addressed as `[group name][field key]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueBag(BTreeMap<String, BTreeMap<String, FieldValue>>);

impl ValueBag {
    /// Builds a bag holding exactly one value per declared field: its default
    /// value, or an empty string.
    pub fn seed(schema: &TemplateSchema) -> Self {
        let mut bag = ValueBag::default();
        for (group, field) in schema.fields() {
            bag.set(&group.group_name, &field.key(), field.initial_value());
        }
        bag
    }

    /// Adds seed values for fields the bag does not know yet, keeping every
    /// value already present. Used when an entry saved against an older
    /// revision of the schema is opened for editing.
    pub fn fill_missing(&mut self, schema: &TemplateSchema) {
        for (group, field) in schema.fields() {
            self.0
                .entry(group.group_name.clone())
                .or_default()
                .entry(field.key())
                .or_insert_with(|| field.initial_value());
        }
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&FieldValue> {
        self.0.get(group).and_then(|values| values.get(key))
    }

    /// The stored value, with a missing key read as empty.
    pub fn value_or_empty(&self, group: &str, key: &str) -> FieldValue {
        self.get(group, key).cloned().unwrap_or_else(FieldValue::empty)
    }

    pub fn set(&mut self, group: &str, key: &str, value: FieldValue) {
        self.0
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn group(&self, group: &str) -> Option<&BTreeMap<String, FieldValue>> {
        self.0.get(group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, FieldValue>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldDefinition, FieldType};
    use crate::model::schema::FieldGroup;

    #[test]
    fn seed_uses_default_or_empty() {
        let mut hours = FieldDefinition::new("Hours", FieldType::Number);
        hours.default_value = Some(FieldValue::Number(8.0));
        let schema = TemplateSchema::new(vec![FieldGroup::new("Shift")
            .with_field(hours)
            .with_field(FieldDefinition::new("Ward Name", FieldType::Select))]);

        let bag = ValueBag::seed(&schema);
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get("Shift", "hours"), Some(&FieldValue::Number(8.0)));
        assert_eq!(bag.get("Shift", "ward_name"), Some(&FieldValue::empty()));
    }

    #[test]
    fn fill_missing_keeps_existing_values() {
        let schema = TemplateSchema::new(vec![FieldGroup::new("Info")
            .with_field(FieldDefinition::new("Name", FieldType::Text))
            .with_field(FieldDefinition::new("Batch", FieldType::Text))]);
        let mut bag = ValueBag::default();
        bag.set("Info", "name", "Ann".into());

        bag.fill_missing(&schema);
        assert_eq!(bag.get("Info", "name"), Some(&FieldValue::from("Ann")));
        assert_eq!(bag.get("Info", "batch"), Some(&FieldValue::empty()));
    }

    #[test]
    fn missing_key_reads_as_empty() {
        let bag = ValueBag::default();
        assert_eq!(bag.value_or_empty("Info", "name"), FieldValue::empty());
        assert!(bag.is_empty());
    }

    #[test]
    fn deserializes_backend_shape() {
        let bag: ValueBag =
            serde_json::from_str(r#"{"Info":{"full_name":"Ann","age":31,"_sequence":1}}"#)
                .unwrap();
        assert_eq!(bag.get("Info", "age"), Some(&FieldValue::Number(31.0)));
        assert_eq!(bag.get("Info", "_sequence"), Some(&FieldValue::Number(1.0)));
    }
}
